/*
Copyright 2017 Takashi Ogura

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/
use std::collections::HashSet;

use indexmap::IndexMap;

use crate::errors::*;

/// Joint angles by joint name, in insertion order
#[derive(Clone, Debug, Default, PartialEq)]
pub struct JointConfiguration {
    positions: IndexMap<String, f64>,
}

impl JointConfiguration {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later pairs overwrite earlier ones with the same name
    pub fn from_pairs<I, S>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        Self {
            positions: pairs
                .into_iter()
                .map(|(name, position)| (name.into(), position))
                .collect(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, position: f64) -> Option<f64> {
        self.positions.insert(name.into(), position)
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.positions.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.positions.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.positions.iter().map(|(k, v)| (k.as_str(), *v))
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for JointConfiguration {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

/// Ordered joint names of an arm
///
/// Checked once on creation, so the configurations built from it always have
/// the same keys in the same order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct JointDomain {
    names: Vec<String>,
}

impl JointDomain {
    /// # Example
    ///
    /// ```
    /// use pickplace_planner::JointDomain;
    ///
    /// let domain = JointDomain::new(vec!["s0".to_owned(), "s1".to_owned()]).unwrap();
    /// let config = domain.configuration(&[0.1, 0.2]).unwrap();
    /// assert_eq!(config.get("s1"), Some(0.2));
    /// assert!(JointDomain::new(vec![]).is_err());
    /// ```
    pub fn new(names: Vec<String>) -> Result<Self> {
        if names.is_empty() {
            return Err(Error::EmptyJointSet);
        }
        let mut seen = HashSet::with_capacity(names.len());
        for name in &names {
            if !seen.insert(name.as_str()) {
                return Err(Error::DuplicateJoint(name.clone()));
            }
        }
        Ok(Self { names })
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn dof(&self) -> usize {
        self.names.len()
    }

    /// Pair `positions` with the joint names
    pub fn configuration(&self, positions: &[f64]) -> Result<JointConfiguration> {
        if positions.len() != self.names.len() {
            return Err(Error::DofMismatch(positions.len(), self.names.len()));
        }
        Ok(self
            .names
            .iter()
            .cloned()
            .zip(positions.iter().copied())
            .collect())
    }

    /// Check that every joint of the domain has a position in `config`
    pub fn validate(&self, config: &JointConfiguration) -> Result<()> {
        match self.names.iter().find(|name| !config.contains(name)) {
            Some(name) => Err(Error::NoJoint(name.clone())),
            None => Ok(()),
        }
    }

    /// Positions of `config` in the order of the domain
    pub fn positions(&self, config: &JointConfiguration) -> Result<Vec<f64>> {
        self.names
            .iter()
            .map(|name| config.get(name).ok_or_else(|| Error::NoJoint(name.clone())))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_configuration_order() {
        let config = JointConfiguration::from_pairs([("w1", 0.5), ("e0", -0.2), ("s0", 1.0)]);
        assert_eq!(config.names().collect::<Vec<_>>(), vec!["w1", "e0", "s0"]);
        assert_eq!(config.get("e0"), Some(-0.2));
        assert_eq!(config.get("x"), None);
        assert_eq!(config.len(), 3);
    }

    #[test]
    fn test_domain_validation() {
        assert!(matches!(JointDomain::new(vec![]), Err(Error::EmptyJointSet)));
        assert!(matches!(
            JointDomain::new(names(&["a", "b", "a"])),
            Err(Error::DuplicateJoint(name)) if name == "a"
        ));
        let domain = JointDomain::new(names(&["a", "b"])).unwrap();
        assert_eq!(domain.dof(), 2);
        assert!(matches!(
            domain.configuration(&[1.0]),
            Err(Error::DofMismatch(1, 2))
        ));
    }

    #[test]
    fn test_domain_positions() {
        let domain = JointDomain::new(names(&["a", "b"])).unwrap();
        let config = JointConfiguration::from_pairs([("b", 2.0), ("c", 3.0), ("a", 1.0)]);
        domain.validate(&config).unwrap();
        assert_eq!(domain.positions(&config).unwrap(), vec![1.0, 2.0]);

        let partial = JointConfiguration::from_pairs([("a", 1.0)]);
        assert!(matches!(
            domain.validate(&partial),
            Err(Error::NoJoint(name)) if name == "b"
        ));
        assert!(domain.positions(&partial).is_err());
    }
}
