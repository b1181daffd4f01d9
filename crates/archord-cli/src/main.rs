use archord::render::{ArcDiagram, SvgRenderOptions, Viewport, render_scene_svg, sanitize_svg_id};
use archord::{DiagramConfig, Entity, Position, Reference, Section};
use serde::Deserialize;
use std::io::Read;

#[derive(Debug)]
enum CliError {
    Usage(&'static str),
    Io(std::io::Error),
    Json(serde_json::Error),
    Core(archord::Error),
    Render(archord_render::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{msg}"),
            CliError::Io(err) => write!(f, "I/O error: {err}"),
            CliError::Json(err) => write!(f, "JSON error: {err}"),
            CliError::Core(err) => write!(f, "{err}"),
            CliError::Render(err) => write!(f, "{err}"),
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<archord::Error> for CliError {
    fn from(value: archord::Error) -> Self {
        Self::Core(value)
    }
}

impl From<archord_render::Error> for CliError {
    fn from(value: archord_render::Error) -> Self {
        Self::Render(value)
    }
}

#[derive(Debug, Clone, Copy, Default)]
enum Command {
    #[default]
    Render,
    Counts,
}

/// Entity dataset file, in the shape the corpus export pipeline emits: the
/// domain constants alongside the entity list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct EntityFile {
    #[serde(alias = "totalVerses")]
    domain_size: u32,
    #[serde(alias = "otEndPosition")]
    split_position: Position,
    #[serde(default, alias = "ntStartPosition")]
    high_region_start: Option<Position>,
    #[serde(alias = "books")]
    entities: Vec<Entity>,
}

#[derive(Debug, Deserialize)]
struct ReferenceFile {
    references: Vec<Reference>,
}

#[derive(Debug, Default)]
struct Args {
    command: Command,
    entities_path: Option<String>,
    refs_path: Option<String>,
    width: f64,
    height: f64,
    section: Section,
    focus: Option<String>,
    reveal: Option<Position>,
    major: Option<Vec<String>>,
    diagram_id: Option<String>,
    pretty: bool,
    out: Option<String>,
}

fn usage() -> &'static str {
    "archord\n\
\n\
USAGE:\n\
  archord render --entities <path> --refs <path> [--width <w>] [--height <h>]\n\
                 [--section <tag>] [--focus <entity-id>] [--reveal <position>]\n\
                 [--major <id,id,...>] [--id <diagram-id>] [--out <path>]\n\
  archord counts --entities <path> --refs <path> [--pretty] [--out <path>]\n\
\n\
NOTES:\n\
  - Dataset paths accept '-' to read that file from stdin (at most one).\n\
  - The entity file carries the domain constants (domainSize, splitPosition,\n\
    optional highRegionStart) next to the entity list.\n\
  - --section takes one of intro, lowRegionFocus, highRegionFocus, timeline,\n\
    transitionEvent (default intro).\n\
  - --major defaults to the ten largest entities by span length.\n\
  - render prints SVG to stdout by default; use --out to write a file.\n\
"
}

fn parse_args(argv: &[String]) -> Result<Args, CliError> {
    let mut args = Args {
        width: 960.0,
        height: 320.0,
        ..Default::default()
    };
    let mut command_seen = false;

    let mut it = argv.iter().skip(1).peekable();
    while let Some(a) = it.next() {
        match a.as_str() {
            "--help" | "-h" => return Err(CliError::Usage(usage())),
            "render" if !command_seen => {
                args.command = Command::Render;
                command_seen = true;
            }
            "counts" if !command_seen => {
                args.command = Command::Counts;
                command_seen = true;
            }
            "--entities" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.entities_path = Some(path.clone());
            }
            "--refs" => {
                let Some(path) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.refs_path = Some(path.clone());
            }
            "--width" => {
                let Some(w) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.width = w.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--height" => {
                let Some(h) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.height = h.parse::<f64>().map_err(|_| CliError::Usage(usage()))?;
            }
            "--section" => {
                let Some(tag) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.section = tag
                    .parse::<Section>()
                    .map_err(|_| CliError::Usage(usage()))?;
            }
            "--focus" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.focus = Some(id.clone());
            }
            "--reveal" => {
                let Some(p) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.reveal = Some(p.parse::<Position>().map_err(|_| CliError::Usage(usage()))?);
            }
            "--major" => {
                let Some(list) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.major = Some(
                    list.split(',')
                        .map(str::trim)
                        .filter(|s| !s.is_empty())
                        .map(String::from)
                        .collect(),
                );
            }
            "--id" => {
                let Some(id) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.diagram_id = Some(id.clone());
            }
            "--pretty" => args.pretty = true,
            "--out" => {
                let Some(out) = it.next() else {
                    return Err(CliError::Usage(usage()));
                };
                args.out = Some(out.clone());
            }
            _ => return Err(CliError::Usage(usage())),
        }
    }

    if args.entities_path.is_none() || args.refs_path.is_none() {
        return Err(CliError::Usage(usage()));
    }
    Ok(args)
}

fn read_input(path: &str) -> Result<String, CliError> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        Ok(std::fs::read_to_string(path)?)
    }
}

fn write_output(out: Option<&str>, content: &str) -> Result<(), CliError> {
    match out {
        Some(path) => std::fs::write(path, content)?,
        None => println!("{content}"),
    }
    Ok(())
}

/// Presentation default when no `--major` is given: the ten widest entities,
/// which is roughly the set a narrative overview keeps labelled.
fn default_major(entities: &[Entity]) -> Vec<String> {
    let mut by_span: Vec<&Entity> = entities.iter().collect();
    by_span.sort_by(|a, b| b.verse_count.cmp(&a.verse_count).then(a.id.cmp(&b.id)));
    by_span.iter().take(10).map(|e| e.id.clone()).collect()
}

fn load_diagram(args: &Args) -> Result<ArcDiagram, CliError> {
    let (Some(entities_path), Some(refs_path)) =
        (args.entities_path.as_deref(), args.refs_path.as_deref())
    else {
        return Err(CliError::Usage(usage()));
    };
    let entity_file: EntityFile = serde_json::from_str(&read_input(entities_path)?)?;
    let reference_file: ReferenceFile = serde_json::from_str(&read_input(refs_path)?)?;

    let mut config = DiagramConfig::new(entity_file.domain_size, entity_file.split_position);
    config.high_region_start = entity_file.high_region_start;

    let major = args
        .major
        .clone()
        .unwrap_or_else(|| default_major(&entity_file.entities));

    let mut diagram = ArcDiagram::new(config)?;
    diagram.load(entity_file.entities, reference_file.references)?;
    diagram.set_major_entities(major);
    Ok(diagram)
}

fn run(args: Args) -> Result<(), CliError> {
    match args.command {
        Command::Render => {
            let mut diagram = load_diagram(&args)?;
            diagram.initialize(Viewport::new(args.width, args.height))?;
            diagram.on_section_enter(args.section, args.focus.as_deref())?;
            let scene = match args.reveal {
                Some(position) => diagram.reveal_to(position)?,
                None => diagram.redraw()?,
            };
            let options = SvgRenderOptions {
                diagram_id: args.diagram_id.as_deref().map(sanitize_svg_id),
                ..SvgRenderOptions::default()
            };
            write_output(args.out.as_deref(), &render_scene_svg(&scene, &options))
        }
        Command::Counts => {
            let diagram = load_diagram(&args)?;
            let counts = diagram.counts_per_entity()?;
            let json = if args.pretty {
                serde_json::to_string_pretty(&counts)?
            } else {
                serde_json::to_string(&counts)?
            };
            write_output(args.out.as_deref(), &json)
        }
    }
}

fn main() {
    let args = match parse_args(&std::env::args().collect::<Vec<_>>()) {
        Ok(v) => v,
        Err(CliError::Usage(msg)) => {
            eprintln!("{msg}");
            std::process::exit(2);
        }
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    };

    match run(args) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(1);
        }
    }
}
