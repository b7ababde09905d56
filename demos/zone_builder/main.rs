//! Scripted zone-building session.
//!
//! Replays a list of clicked ground points, builds the zone mesh and prints
//! what a renderer would receive, then shows the error for a zone with too
//! few points.
//!
//! Usage:
//! ```text
//! cargo run --example zone_builder
//! RUST_LOG=zonemesh=trace cargo run --example zone_builder
//! ```

use zonemesh::math::{Point2, Point3};
use zonemesh::{Triangulate, ZoneBuilder, ZonemeshError};

const CLICKS: [(f64, f64, f64); 7] = [
    (-4.0, 0.0, -3.0),
    (5.0, 0.1, -4.0),
    (7.5, 0.0, 2.0),
    (1.0, 0.2, 6.0),
    (-5.0, 0.0, 3.5),
    (0.5, 0.0, 0.0),
    (3.0, 0.1, 1.5),
];

fn main() -> Result<(), ZonemeshError> {
    // Default: WARN for everything, INFO for zonemesh.
    // Override with RUST_LOG env var (e.g. RUST_LOG=zonemesh=debug).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("zonemesh=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut builder = ZoneBuilder::new();
    for (x, y, z) in CLICKS {
        builder.add_point(Point3::new(x, y, z));
    }
    let ground: Vec<Point2> = builder.points().iter().map(|p| Point2::new(p.x, p.z)).collect();

    let mesh = builder.finalize()?;
    println!(
        "zone: {} vertices, {} triangles, area {:.3}",
        mesh.vertices.len(),
        mesh.triangle_count(),
        mesh.area()
    );
    if let Some(centre) = mesh.centroid() {
        println!("camera target: ({:.3}, {:.3}, {:.3})", centre.x, centre.y, centre.z);
    }
    if let Some(aabb) = mesh.bounding_box() {
        println!("bounds: {:?} .. {:?}", aabb.min.coords.as_slice(), aabb.max.coords.as_slice());
    }
    println!("indices: {:?}", mesh.flat_indices());

    let triangulation = Triangulate::new(&ground).execute()?;
    for tri in triangulation.triangles() {
        let centre = tri.circumcenter();
        let label = if centre.x.is_finite() && centre.y.is_finite() {
            format!("({:.3}, {:.3})", centre.x, centre.y)
        } else {
            "undefined".to_string()
        };
        let centroid = tri.centroid();
        println!(
            "triangle {:?}: circumcenter {label}, centroid ({:.3}, {:.3})",
            tri.indices(),
            centroid.x,
            centroid.y
        );
    }

    builder.add_point(Point3::new(0.0, 0.0, 0.0));
    builder.add_point(Point3::new(1.0, 0.0, 1.0));
    match builder.finalize() {
        Ok(_) => println!("unexpected: two points made a zone"),
        Err(err) => println!("second zone rejected: {err}"),
    }

    Ok(())
}
