use serde::Serialize;
use trispan::util::Rng;
use trispan::{
    merge_rows, rasterize_triangle, rasterize_triangle_with_capacity, Canvas, Span, Triangle,
    TriangleSet,
};

/// Canvas size used to place random triangles when no --ascii size is given
const RANDOM_WIDTH: i32 = 80;
const RANDOM_HEIGHT: i32 = 48;

#[derive(Debug, Default)]
struct Options {
    coords: Vec<i32>,
    scene: Option<String>,
    random: Option<usize>,
    seed: u64,
    save: Option<String>,
    capacity: Option<usize>,
    json: bool,
    ascii: Option<(u32, u32)>,
    merge: bool,
    help: bool,
}

/// One rasterized triangle as printed by --json
#[derive(Serialize)]
struct Rasterized<'a> {
    triangle: &'a Triangle,
    spans: Vec<Span>,
    dropped: usize,
}

fn print_help() {
    println!("Usage: trispan [OPTIONS] [X1 Y1 X2 Y2 X3 Y3]");
    println!();
    println!("Rasterize triangles into (x1, x2, y) spans.");
    println!();
    println!("Options:");
    println!("  --scene FILE          Rasterize every triangle in a JSON triangle set");
    println!("  --random N            Rasterize N random triangles");
    println!("  --seed S              Seed for --random (default: 1)");
    println!("  --save FILE           Write the triangles used to a JSON triangle set");
    println!("  --capacity N          Span buffer size (default: exact row count)");
    println!("  --merge               Fold duplicate rows into one span per row");
    println!("  --json                Print spans as JSON");
    println!(
        "  --ascii WxH           Paint spans on a WxH canvas (e.g., {}x{})",
        RANDOM_WIDTH, RANDOM_HEIGHT
    );
    println!("  --help                Show this help message");
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args
        .get(i + 1)
        .ok_or_else(|| format!("{} needs a value", flag))?;
    raw.parse()
        .map_err(|_| format!("invalid value '{}' for {}", raw, flag))
}

/// Parse WxH format (e.g., 80x48)
fn parse_size(raw: &str) -> Option<(u32, u32)> {
    let (w, h) = raw.split_once('x')?;
    Some((w.parse().ok()?, h.parse().ok()?))
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut opts = Options {
        seed: 1,
        ..Options::default()
    };

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--help" => opts.help = true,
            "--json" => opts.json = true,
            "--merge" => opts.merge = true,
            "--scene" => {
                opts.scene = Some(parse_value(args, i, "--scene")?);
                i += 1;
            },
            "--save" => {
                opts.save = Some(parse_value(args, i, "--save")?);
                i += 1;
            },
            "--random" => {
                opts.random = Some(parse_value(args, i, "--random")?);
                i += 1;
            },
            "--seed" => {
                opts.seed = parse_value(args, i, "--seed")?;
                i += 1;
            },
            "--capacity" => {
                opts.capacity = Some(parse_value(args, i, "--capacity")?);
                i += 1;
            },
            "--ascii" => {
                let raw: String = parse_value(args, i, "--ascii")?;
                opts.ascii =
                    Some(parse_size(&raw).ok_or_else(|| format!("invalid canvas size '{}'", raw))?);
                i += 1;
            },
            other => {
                let value = other
                    .parse::<i32>()
                    .map_err(|_| format!("unknown argument '{}'", other))?;
                opts.coords.push(value);
            },
        }
        i += 1;
    }

    if !opts.coords.is_empty() && opts.coords.len() != 6 {
        return Err(format!(
            "expected 6 coordinates, got {}",
            opts.coords.len()
        ));
    }

    Ok(opts)
}

/// Collect the triangles named on the command line
fn build_set(opts: &Options) -> Result<TriangleSet, String> {
    let mut set = match &opts.scene {
        Some(path) => TriangleSet::load(path).map_err(|e| format!("{}: {}", path, e))?,
        None => TriangleSet::new("command line"),
    };

    if let [x1, y1, x2, y2, x3, y3] = opts.coords[..] {
        set.add(Triangle::from_coords(x1, y1, x2, y2, x3, y3));
    }

    if let Some(count) = opts.random {
        let (width, height) = opts
            .ascii
            .map_or((RANDOM_WIDTH, RANDOM_HEIGHT), |(w, h)| (w as i32, h as i32));
        let mut rng = Rng::new(opts.seed);
        for _ in 0..count {
            set.add(rng.triangle_in(width, height));
        }
    }

    Ok(set)
}

fn run(args: &[String]) -> Result<(), String> {
    let opts = parse_args(args)?;
    if opts.help {
        print_help();
        return Ok(());
    }

    let set = build_set(&opts)?;
    if set.is_empty() {
        return Err("no triangles given (try --help)".to_string());
    }

    if let Some(path) = &opts.save {
        set.save(path)?;
        log::info!("saved {} triangles to {}", set.len(), path);
    }

    let mut canvas = opts.ascii.map(|(w, h)| Canvas::with_size(w, h));
    let mut results = Vec::with_capacity(set.len());

    for triangle in &set.triangles {
        let buffer = match opts.capacity {
            Some(capacity) => rasterize_triangle_with_capacity(triangle.points, capacity),
            None => rasterize_triangle(triangle.points),
        }
        .map_err(|e| e.to_string())?;

        let dropped = buffer.dropped();
        let spans = if opts.merge {
            merge_rows(buffer.spans())
        } else {
            buffer.into_spans()
        };

        if let Some(canvas) = canvas.as_mut() {
            canvas.fill_spans_additive(&spans, 1);
        }
        results.push(Rasterized {
            triangle,
            spans,
            dropped,
        });
    }

    if opts.json {
        let json = serde_json::to_string_pretty(&results).map_err(|e| e.to_string())?;
        println!("{}", json);
    } else if canvas.is_none() {
        for result in &results {
            let [a, b, c] = result.triangle.points;
            println!(
                "# ({},{}) ({},{}) ({},{}): {} spans, {} dropped",
                a.x,
                a.y,
                b.x,
                b.y,
                c.x,
                c.y,
                result.spans.len(),
                result.dropped
            );
            for span in &result.spans {
                println!("{} {} {}", span.x1, span.x2, span.y);
            }
        }
    }

    if let Some(canvas) = &canvas {
        print!("{}", canvas.to_ascii());
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(e) = run(&args) {
        eprintln!("trispan: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_ascii_takes_one_wxh_argument() {
        let opts = parse_args(&args(&["--ascii", "80x48", "0", "0", "5", "9", "-5", "9"])).unwrap();
        assert_eq!(opts.ascii, Some((80, 48)));
        assert_eq!(opts.coords, vec![0, 0, 5, 9, -5, 9]);

        assert!(parse_args(&args(&["--ascii", "80", "48"])).is_err());
        assert!(parse_args(&args(&["--ascii"])).is_err());
    }
}
