#[cfg(target_arch = "wasm32")]
fn main() {
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("scene_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use star_stack_engine::Engine;
    use star_stack_engine::geom::{GeomMesh, Segment3};
    use star_stack_engine::scene::{
        GaussianSceneOptions, GaussianTangentScene, HomographyScene, HomographySceneOptions,
    };
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;
    const DEFAULT_SEED: u64 = 0;

    const USAGE: &str = r#"scene_cli (star-stack-engine)

USAGE:
  scene_cli list
  scene_cli run <scene|all> [options]

SCENES:
  gaussian_surface
  tangent_patch
  homography_pairs

OPTIONS (run):
  --seed <n>         Seed for the keypoint generator (default 0)
  --out-dir <dir>    Write <scene>.obj and/or <scene>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single scene only, mesh scenes only)
  --snap <path>      Write snapshot (single scene only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                for scene in SceneKind::ALL {
                    println!("{}", scene.name());
                }
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let scene_name = args.next().ok_or("missing scene name")?;

        let mut seed = DEFAULT_SEED;
        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut write_obj = true;
        let mut write_snap = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--seed" => {
                    let raw = args.value("--seed")?;
                    seed = raw
                        .parse()
                        .map_err(|e| format!("invalid --seed `{raw}`: {e}"))?;
                }
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => overwrite = true,
                "--no-obj" => write_obj = false,
                "--no-snap" => write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !write_obj && !write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            let scenes: Vec<SceneKind> = if scene_name == "all" {
                SceneKind::ALL.to_vec()
            } else {
                vec![SceneKind::from_name(&scene_name).ok_or_else(|| unknown_scene(&scene_name))?]
            };
            for scene in scenes {
                let output = run_scene(scene, seed)?;
                if write_snap {
                    let path = dir.join(format!("{}.snap", output.name));
                    write_text_file(&path, &output.snapshot, overwrite)?;
                    eprintln!("wrote {}", path.display());
                }
                if write_obj {
                    if let Some(mesh) = output.mesh.as_ref() {
                        let path = dir.join(format!("{}.obj", output.name));
                        write_obj_file(&path, mesh, output.name, overwrite)?;
                        eprintln!("wrote {}", path.display());
                    }
                }
                report(&output);
            }
            return Ok(());
        }

        if scene_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let scene = SceneKind::from_name(&scene_name).ok_or_else(|| unknown_scene(&scene_name))?;
        let output = run_scene(scene, seed)?;

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &output.snapshot, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{}", output.snapshot);
        }

        if let Some(path) = obj_path.as_deref() {
            let mesh = output
                .mesh
                .as_ref()
                .ok_or_else(|| format!("scene `{}` has no mesh to write", output.name))?;
            write_obj_file(path, mesh, output.name, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(&output);
        Ok(())
    }

    fn report(output: &SceneOutput) {
        match output.mesh.as_ref() {
            Some(mesh) => eprintln!(
                "{}: vertices={} triangles={}",
                output.name,
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
            None => eprintln!("{}: {}", output.name, output.summary),
        }
    }

    fn unknown_scene(name: &str) -> String {
        let mut msg = format!("unknown scene `{name}`\n\navailable scenes:\n");
        for scene in SceneKind::ALL {
            let _ = writeln!(msg, "  {}", scene.name());
        }
        msg
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    fn write_obj_file(path: &Path, mesh: &GeomMesh, name: &str, overwrite: bool) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);

        writeln!(w, "# star-stack-engine scene_cli").map_err(|e| format!("write obj: {e}"))?;
        writeln!(w, "o {name}").map_err(|e| format!("write obj: {e}"))?;

        for p in mesh.positions.iter().copied() {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2]).map_err(|e| format!("write obj: {e}"))?;
        }

        if let Some(normals) = mesh.normals.as_ref() {
            for n in normals.iter().copied() {
                writeln!(w, "vn {} {} {}", n[0], n[1], n[2]).map_err(|e| format!("write obj: {e}"))?;
            }
        }

        let has_normals = mesh.normals.is_some();
        for tri in mesh.indices.chunks_exact(3) {
            let a = tri[0] + 1;
            let b = tri[1] + 1;
            let c = tri[2] + 1;

            if has_normals {
                writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}")
            } else {
                writeln!(w, "f {a} {b} {c}")
            }
            .map_err(|e| format!("write obj: {e}"))?;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_vec3_line(out: &mut String, prefix: &str, v: [f64; 3]) {
        let _ = write!(out, "{prefix} ");
        write_f64(out, v[0]);
        out.push(' ');
        write_f64(out, v[1]);
        out.push(' ');
        write_f64(out, v[2]);
        out.push('\n');
    }

    fn write_scalar_line(out: &mut String, key: &str, value: f64) {
        let _ = write!(out, "{key} ");
        write_f64(out, value);
        out.push('\n');
    }

    fn write_mesh(out: &mut String, mesh: &GeomMesh) -> Result<(), String> {
        mesh.validate().map_err(|e| format!("mesh validation failed: {e}"))?;

        let _ = writeln!(out, "mesh.vertex_count {}", mesh.positions.len());
        let _ = writeln!(out, "mesh.triangle_count {}", mesh.triangle_count());

        let _ = writeln!(out, "mesh.positions {}", mesh.positions.len());
        for p in mesh.positions.iter().copied() {
            write_vec3_line(out, "p", p);
        }

        let _ = writeln!(out, "mesh.indices {}", mesh.indices.len());
        for tri in mesh.indices.chunks_exact(3) {
            let _ = writeln!(out, "i {} {} {}", tri[0], tri[1], tri[2]);
        }

        if let Some(normals) = mesh.normals.as_ref() {
            let _ = writeln!(out, "mesh.normals {}", normals.len());
            for n in normals.iter().copied() {
                write_vec3_line(out, "n", n);
            }
        } else {
            let _ = writeln!(out, "mesh.normals none");
        }
        Ok(())
    }

    fn write_segments(out: &mut String, key: &str, segments: &[Segment3]) {
        let _ = writeln!(out, "{key} {}", segments.len());
        for s in segments {
            write_vec3_line(out, "s", s.start);
            write_vec3_line(out, "e", s.end);
        }
    }

    fn write_tangent_plane(out: &mut String, scene: &GaussianTangentScene) {
        let (dx, dy) = scene.plane.slopes();
        write_vec3_line(out, "tangent.anchor", scene.plane.anchor().to_array());
        write_scalar_line(out, "tangent.dx", dx);
        write_scalar_line(out, "tangent.dy", dy);
        write_scalar_line(out, "tangent.bias", scene.plane.bias());
        write_vec3_line(out, "tangent.normal", scene.plane.normal().to_array());
    }

    fn snapshot(scene: &str, sections: impl FnOnce(&mut String) -> Result<(), String>) -> Result<String, String> {
        let mut out = String::new();
        let _ = writeln!(out, "# star-stack-engine golden v1");
        let _ = writeln!(out, "scene {scene}");
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        sections(&mut out)?;
        Ok(normalize_snapshot_text(&out))
    }

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum SceneKind {
        GaussianSurface,
        TangentPatch,
        HomographyPairs,
    }

    impl SceneKind {
        const ALL: &'static [SceneKind] = &[
            SceneKind::GaussianSurface,
            SceneKind::TangentPatch,
            SceneKind::HomographyPairs,
        ];

        fn name(self) -> &'static str {
            match self {
                SceneKind::GaussianSurface => "gaussian_surface",
                SceneKind::TangentPatch => "tangent_patch",
                SceneKind::HomographyPairs => "homography_pairs",
            }
        }

        fn from_name(name: &str) -> Option<Self> {
            SceneKind::ALL.iter().copied().find(|scene| scene.name() == name)
        }
    }

    struct SceneOutput {
        name: &'static str,
        mesh: Option<GeomMesh>,
        summary: String,
        snapshot: String,
    }

    fn run_scene(scene: SceneKind, seed: u64) -> Result<SceneOutput, String> {
        match scene {
            SceneKind::GaussianSurface => scene_gaussian_surface(),
            SceneKind::TangentPatch => scene_tangent_patch(),
            SceneKind::HomographyPairs => scene_homography_pairs(seed),
        }
    }

    fn gaussian_scene() -> Result<GaussianTangentScene, String> {
        Engine::with_seed(DEFAULT_SEED)
            .gaussian_tangent(&GaussianSceneOptions::default())
            .map_err(|e| e.to_string())
    }

    fn scene_gaussian_surface() -> Result<SceneOutput, String> {
        let scene = gaussian_scene()?;
        let name = SceneKind::GaussianSurface.name();
        let snap = snapshot(name, |out| {
            write_scalar_line(out, "field.amplitude", scene.field.amplitude());
            write_scalar_line(out, "field.sigma", scene.field.sigma());
            let _ = writeln!(out, "stars {}", scene.stars.len());
            for star in &scene.stars {
                write_vec3_line(out, "star", star.to_array());
            }
            write_segments(out, "star_lines", &scene.star_lines);
            write_mesh(out, &scene.surface_mesh)
        })?;

        Ok(SceneOutput {
            name,
            summary: String::new(),
            mesh: Some(scene.surface_mesh),
            snapshot: snap,
        })
    }

    fn scene_tangent_patch() -> Result<SceneOutput, String> {
        let scene = gaussian_scene()?;
        let name = SceneKind::TangentPatch.name();
        let snap = snapshot(name, |out| {
            write_tangent_plane(out, &scene);
            write_mesh(out, &scene.tangent_mesh)
        })?;

        Ok(SceneOutput {
            name,
            summary: String::new(),
            mesh: Some(scene.tangent_mesh),
            snapshot: snap,
        })
    }

    fn scene_homography_pairs(seed: u64) -> Result<SceneOutput, String> {
        let scene: HomographyScene = Engine::with_seed(seed)
            .homography(&HomographySceneOptions::default())
            .map_err(|e| e.to_string())?;
        let name = SceneKind::HomographyPairs.name();
        let snap = snapshot(name, |out| {
            let _ = writeln!(out, "seed {seed}");
            write_segments(out, "source_grid", &scene.source_grid);
            write_segments(out, "target_grid", &scene.target_grid);
            let _ = writeln!(out, "pairs {}", scene.pairs.len());
            for pair in &scene.pairs {
                let _ = writeln!(out, "tag {}", pair.tag.hex());
                write_vec3_line(out, "src", pair.source.to_array());
                write_vec3_line(out, "dst", pair.target.to_array());
            }
            Ok(())
        })?;

        Ok(SceneOutput {
            name,
            mesh: None,
            summary: format!(
                "grid_lines={} pairs={}",
                scene.source_grid.len() + scene.target_grid.len(),
                scene.pairs.len()
            ),
            snapshot: snap,
        })
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next()
                .ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
