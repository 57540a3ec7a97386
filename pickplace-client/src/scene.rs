use indexmap::IndexMap;
use nalgebra as na;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::*;

/// An object reported by the detection feed, in the world frame
#[derive(Clone, Debug, PartialEq)]
pub struct DetectedObject {
    pub id: String,
    pub pose: na::Isometry3<f64>,
}

impl DetectedObject {
    pub fn new(id: impl Into<String>, pose: na::Isometry3<f64>) -> Self {
        Self {
            id: id.into(),
            pose,
        }
    }
}

/// Detections outside of these bounds are dropped
#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct WorkspaceBounds {
    #[serde(default = "default_min_x")]
    pub min_x: f64,
    #[serde(default = "default_min_y")]
    pub min_y: f64,
    #[serde(default = "default_max_y")]
    pub max_y: f64,
    #[serde(default = "default_min_z")]
    pub min_z: f64,
}

fn default_min_x() -> f64 {
    0.3
}

fn default_min_y() -> f64 {
    -0.8
}

fn default_max_y() -> f64 {
    0.8
}

fn default_min_z() -> f64 {
    -0.3
}

impl Default for WorkspaceBounds {
    fn default() -> Self {
        Self {
            min_x: default_min_x(),
            min_y: default_min_y(),
            max_y: default_max_y(),
            min_z: default_min_z(),
        }
    }
}

impl WorkspaceBounds {
    /// All the bounds are exclusive
    pub fn contains(&self, position: &na::Vector3<f64>) -> bool {
        position.x > self.min_x
            && position.y > self.min_y
            && position.y < self.max_y
            && position.z > self.min_z
    }
}

/// Size of the collision box put around each detected object
#[derive(Clone, Serialize, Deserialize, Debug, JsonSchema, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ObjectBoxConfig {
    /// x and y size [m]
    #[serde(default = "default_box_width")]
    pub width: f64,
    /// z size [m]
    #[serde(default = "default_box_height")]
    pub height: f64,
    /// The box center is raised by this from the detected pose [m]
    #[serde(default = "default_box_lift")]
    pub lift: f64,
}

fn default_box_width() -> f64 {
    0.03
}

fn default_box_height() -> f64 {
    0.2
}

fn default_box_lift() -> f64 {
    0.1
}

impl Default for ObjectBoxConfig {
    fn default() -> Self {
        Self {
            width: default_box_width(),
            height: default_box_height(),
            lift: default_box_lift(),
        }
    }
}

/// A box shaped obstacle for the motion planning scene
#[derive(Clone, Debug, PartialEq)]
pub struct CollisionBox {
    pub name: String,
    pub pose: na::Isometry3<f64>,
    pub dimensions: na::Vector3<f64>,
}

impl CollisionBox {
    pub fn around_object(object: &DetectedObject, config: &ObjectBoxConfig) -> Self {
        let mut pose = object.pose;
        pose.translation.vector.z += config.lift;
        Self {
            name: object.id.clone(),
            pose,
            dimensions: na::Vector3::new(config.width, config.width, config.height),
        }
    }
}

/// Axis aligned bounding box of a point set
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min: na::Point3<f64>,
    pub max: na::Point3<f64>,
}

impl BoundingBox {
    /// `None` for an empty set
    ///
    /// # Example
    ///
    /// ```
    /// use nalgebra as na;
    /// use pickplace_client::BoundingBox;
    ///
    /// let points = [na::Point3::new(0.0, 1.0, 2.0), na::Point3::new(1.0, -1.0, 3.0)];
    /// let bb = BoundingBox::from_points(&points).unwrap();
    /// assert_eq!(bb.center(), na::Point3::new(0.5, 0.0, 2.5));
    /// assert!(BoundingBox::from_points(&[]).is_none());
    /// ```
    pub fn from_points(points: &[na::Point3<f64>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (min, max) = rest.iter().fold((*first, *first), |(min, max), p| {
            (min.inf(p), max.sup(p))
        });
        Some(Self { min, max })
    }

    pub fn center(&self) -> na::Point3<f64> {
        na::center(&self.min, &self.max)
    }

    pub fn dimensions(&self) -> na::Vector3<f64> {
        self.max - self.min
    }

    /// Axis aligned `CollisionBox` covering the bounding box
    pub fn to_collision_box(&self, name: impl Into<String>) -> CollisionBox {
        CollisionBox {
            name: name.into(),
            pose: na::Isometry3::translation(self.center().x, self.center().y, self.center().z),
            dimensions: self.dimensions(),
        }
    }
}

/// Latest batch of detections with their collision boxes
#[derive(Clone, Debug, Default)]
pub struct SceneSnapshot {
    objects: IndexMap<String, DetectedObject>,
    boxes: IndexMap<String, CollisionBox>,
}

impl SceneSnapshot {
    /// Keep the objects in `bounds`; an object id seen twice keeps the last pose
    pub fn from_detections<I>(detections: I, bounds: &WorkspaceBounds, config: &ObjectBoxConfig) -> Self
    where
        I: IntoIterator<Item = DetectedObject>,
    {
        let mut snapshot = Self::default();
        for object in detections {
            if !bounds.contains(&object.pose.translation.vector) {
                trace!("drop {} out of the workspace", object.id);
                continue;
            }
            snapshot
                .boxes
                .insert(object.id.clone(), CollisionBox::around_object(&object, config));
            snapshot.objects.insert(object.id.clone(), object);
        }
        snapshot
    }

    pub fn object(&self, id: &str) -> Option<&DetectedObject> {
        self.objects.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.objects.contains_key(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.objects.keys().map(String::as_str)
    }

    pub fn objects(&self) -> impl Iterator<Item = &DetectedObject> + '_ {
        self.objects.values()
    }

    pub fn collision_boxes(&self) -> impl Iterator<Item = &CollisionBox> + '_ {
        self.boxes.values()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}
