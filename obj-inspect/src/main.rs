use log::LevelFilter;
use objmesh::{MeshOptions, RenderableMesh};
use std::io::Read;

const USAGE: &str = "usage: obj-inspect [--no-texcoords] [--no-generate-normals] [PATH]";

fn main() {
    simple_logger::SimpleLogger::new()
        .with_level(LevelFilter::Warn)
        .env()
        .init()
        .unwrap();

    let mut options = MeshOptions::default();
    let mut path = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--no-texcoords" => options.texcoords = false,
            "--no-generate-normals" => options.generate_normals = false,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return;
            }
            _ if arg.starts_with("--") => {
                log::error!("unknown flag {}\n{}", arg, USAGE);
                std::process::exit(2);
            }
            _ => path = Some(arg),
        }
    }

    // no path means the obj comes in on stdin
    let mesh = match &path {
        Some(path) => RenderableMesh::load(path, &options),
        None => {
            let mut s = String::new();
            if let Err(e) = std::io::stdin().read_to_string(&mut s) {
                log::error!("could not read stdin: {}", e);
                std::process::exit(1);
            }
            RenderableMesh::from_obj_str(&s, &options)
        }
    };
    let mut mesh = match mesh {
        Ok(mesh) => mesh,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    mesh.placement.center_on_bounds = true;

    let geometry = mesh.geometry();
    let bounds = mesh.bounds();
    println!("source:    {}", path.as_deref().unwrap_or("<stdin>"));
    println!("triangles: {}", geometry.face_count());
    println!("corners:   {}", geometry.indices.len());
    println!(
        "vertices:  {} ({:.1}% of corners)",
        geometry.vertices.len(),
        100.0 * geometry.vertices.len() as f32 / geometry.indices.len() as f32
    );
    println!("texcoords: {}", if geometry.has_texcoords() { "yes" } else { "no" });
    println!("bounds:    {:?} .. {:?}", bounds.min.as_slice(), bounds.max.as_slice());
    println!("center:    {:?}", bounds.center().as_slice());
    println!("model matrix (centered):{}", mesh.model_matrix());
}
