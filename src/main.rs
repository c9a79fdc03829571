use std::error::Error;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use quarry_blocks::BlockRegistry;
use quarry_geom::Vec3;
use quarry_mesh_cpu::{ChunkMesh, extract_mesh};
use quarry_worldgen::{ChunkConfig, generate, generate_seeded};

#[derive(Parser, Debug)]
#[command(
    name = "quarry",
    about = "Generate a voxel chunk from a config file and extract its render mesh"
)]
struct Args {
    /// Chunk configuration file
    #[arg(long, default_value = "config/chunk.toml")]
    config: PathBuf,
    /// Override the configured seed (disables seed randomization)
    #[arg(long)]
    seed: Option<u64>,
    /// View direction used for face culling, as "x,y,z"
    #[arg(long, default_value = "0,1,0", value_parser = parse_vec3)]
    view_dir: Vec3,
    /// Damage hit to apply after generation, as "x,y,z,amount"; repeatable.
    /// Each hit is followed by a full mesh re-extraction.
    #[arg(long = "hit", value_parser = parse_hit)]
    hits: Vec<Hit>,
}

#[derive(Clone, Copy, Debug)]
struct Hit {
    x: i32,
    y: i32,
    z: i32,
    amount: i32,
}

fn parse_vec3(s: &str) -> Result<Vec3, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 3 {
        return Err(format!("expected \"x,y,z\", got {s:?}"));
    }
    let coord = |p: &str| p.trim().parse::<f32>().map_err(|e| e.to_string());
    Ok(Vec3::new(coord(parts[0])?, coord(parts[1])?, coord(parts[2])?))
}

fn parse_hit(s: &str) -> Result<Hit, String> {
    let parts: Vec<&str> = s.split(',').collect();
    if parts.len() != 4 {
        return Err(format!("expected \"x,y,z,amount\", got {s:?}"));
    }
    let coord = |p: &str| p.trim().parse::<i32>().map_err(|e| e.to_string());
    Ok(Hit {
        x: coord(parts[0])?,
        y: coord(parts[1])?,
        z: coord(parts[2])?,
        amount: coord(parts[3])?,
    })
}

fn main() -> ExitCode {
    env_logger::init();
    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let cfg = ChunkConfig::load_from_path(&args.config)?;
    log::info!("loaded chunk config from {}", args.config.display());
    let view = args.view_dir.normalized();

    let mut result = match args.seed {
        Some(seed) => generate_seeded(&cfg, seed),
        None => generate(&cfg),
    };
    print!("{}", result.report.summary());

    let mesh = extract_mesh(&result.grid, &result.registry, None, view);
    print_mesh_stats(&mesh, &result.registry);

    for hit in &args.hits {
        let destroyed = result.grid.apply_damage(hit.x, hit.y, hit.z, hit.amount);
        println!(
            "hit ({}, {}, {}) for {}: {}",
            hit.x,
            hit.y,
            hit.z,
            hit.amount,
            if destroyed { "destroyed" } else { "no kill" }
        );
        let mesh = extract_mesh(&result.grid, &result.registry, None, view);
        print_mesh_stats(&mesh, &result.registry);
    }
    Ok(())
}

fn print_mesh_stats(mesh: &ChunkMesh, registry: &BlockRegistry) {
    println!(
        "mesh: {} vertices, {} faces, {} triangles",
        mesh.vertex_count(),
        mesh.face_count(),
        mesh.triangle_count()
    );
    for (i, kind) in registry.kinds().enumerate() {
        println!(
            "  submesh {} ({}): {} triangles",
            i,
            kind.name,
            mesh.submeshes[i].len() / 3
        );
    }
}
