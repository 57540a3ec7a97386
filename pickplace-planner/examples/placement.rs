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

// cargo run -p pickplace-planner --example placement -- --shape circle --center 50 50 --extent 400 400

use clap::Parser;
use pickplace_planner::{
    PlacementPlanner, PlacementPlannerConfig, PlacementStrategyKind, RegionDescriptor, RegionShape,
};

#[derive(Parser, Debug)]
#[clap(name = "placement")]
struct Opt {
    /// square / rectangle / circle / disk
    #[clap(long, default_value = "circle")]
    shape: RegionShape,
    /// Center of the region [cell]
    #[clap(long, num_args = 2, default_values_t = [50.0, 50.0])]
    center: Vec<f64>,
    /// Extent of the region [cell]
    #[clap(long, num_args = 2, default_values_t = [400.0, 400.0])]
    extent: Vec<f64>,
    /// Safety margin [cell]
    #[clap(long, default_value_t = 3.0)]
    radius: f64,
    /// Print only the first N candidates
    #[clap(long, default_value_t = 10)]
    show: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();
    let opt = Opt::parse();

    let region = RegionDescriptor::new(
        opt.shape,
        [opt.center[0], opt.center[1]],
        [opt.extent[0], opt.extent[1]],
    )?;
    let mut config = PlacementPlannerConfig::default();
    config.field.radius = opt.radius;
    config.strategy = PlacementStrategyKind::FreeCells;
    let planner = PlacementPlanner::new(&config)?;

    let field = planner.solve(&region)?;
    for row in field.to_rows().iter().step_by(4) {
        let line = row
            .iter()
            .step_by(2)
            .map(|v| if *v > 0.0 { '#' } else { '.' })
            .collect::<String>();
        println!("{line}");
    }

    let candidates = planner.plan(&region)?;
    println!("{} candidates", candidates.len());
    for candidate in candidates.iter().take(opt.show) {
        println!("{}: {:?}", candidate.id, candidate.position());
    }
    Ok(())
}
