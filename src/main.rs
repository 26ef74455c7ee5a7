extern crate log;

use anyhow::*;
use miniball::{model::Loader, Miniball, PointSet};

pub fn main() -> Result<()> {
    env_logger::init();

    let paths: Vec<String> = std::env::args().skip(1).collect();
    ensure!(!paths.is_empty(), "usage: miniball <model.obj>...");

    let loader = Loader::new();
    for path in paths.iter() {
        let model = loader.load(path)?;
        let coords: Vec<f32> = model.positions().flat_map(|p| [p.x, p.y, p.z]).collect();
        let points = PointSet::from_f32(&coords, 3)?;
        let ball = Miniball::new(&points);
        if ball.is_empty() {
            log::warn!("{} has no vertices", model.label);
            continue;
        }

        let c = ball.center();
        println!(
            "{} ({} meshes, {} vertices)",
            model.label,
            model.meshes.len(),
            model.vertex_count()
        );
        println!("  center: [{:.6}, {:.6}, {:.6}]", c[0], c[1], c[2]);
        println!("  radius: {:.6}", ball.radius());
        println!("  quality: {}", ball.verify());
    }
    Ok(())
}
