use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{Number, Value};

use gouache_core::{hex_from_color_text, Color, GouacheConfig};
use gouache_session::{
    EditorSession, Geocoder, HttpGeocoder, HttpStyleSource, NullRenderer, StyleSource,
};
use gouache_style::{
    filter_layers, property, ColorCategory, InterpolateExpr, InterpolationKind, LayerFilter,
    MatchExpr, PropertyBlock, PropertyKind, StopSlot, StopsTable, StyleDocument,
};

#[derive(Parser)]
#[command(
    name = "gouache",
    version,
    about = "Gouache: hands-on editing for map style documents",
    long_about = "Gouache edits MapLibre-style map documents from the command line.\nInspect layers, recolor whole categories, tune zoom ramps and dash\npatterns, and export the result as a ready-to-serve style."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the base style document and save it locally
    Fetch {
        /// Style URL (default: the base URL from gouache.config.toml)
        #[arg(long)]
        url: Option<String>,

        /// Where to write the fetched style
        #[arg(short, long, default_value = "style.json")]
        output: PathBuf,
    },

    /// Summarize a style document
    Info {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,
    },

    /// List layers, with an optional kind filter and text search
    Layers {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer kind filter: all, fill, line, background, symbol
        #[arg(long, default_value = "all")]
        filter: String,

        /// Keep only layers whose id or source layer contains this text
        #[arg(long, default_value = "")]
        query: String,
    },

    /// Show a layer's properties and how the editor reads them
    Inspect {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Print the help text for each recognized property
        #[arg(long)]
        explain: bool,
    },

    /// Set one property on a layer
    Set {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Property key, e.g. fill-color
        #[arg()]
        key: String,

        /// New value, parsed as JSON when possible, else kept as text
        #[arg()]
        value: String,

        /// Target the layout block instead of paint
        #[arg(long)]
        layout: bool,

        /// Write the result here instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Set a color property from a hex color
    Color {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Property key, e.g. fill-color
        #[arg()]
        key: String,

        /// Hex color, e.g. '#1a6aa0'
        #[arg()]
        hex: String,

        /// Write the result here instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Set an opacity property from a percentage
    Opacity {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Property key, e.g. fill-opacity
        #[arg()]
        key: String,

        /// Opacity in percent, 0 to 100
        #[arg(allow_negative_numbers = true)]
        percent: f64,

        /// Write the result here instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Toggle a layer's visibility
    Toggle {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Write the result here instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Apply a preset color to a whole category of layers
    Tint {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Category: background, water, buildings, roads
        #[arg()]
        category: String,

        /// Hex color, e.g. '#a9c4c4'
        #[arg()]
        hex: String,

        /// Write the result here instead of editing in place
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Edit the zoom stops of a property (interpolate or stops table)
    Stops {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Property key, e.g. line-width
        #[arg()]
        key: String,

        #[command(subcommand)]
        command: StopsCommands,
    },

    /// Edit the cases of a match expression
    Match {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Property key, e.g. fill-color
        #[arg()]
        key: String,

        #[command(subcommand)]
        command: MatchCommands,
    },

    /// Edit a dash pattern
    Dash {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Layer id
        #[arg()]
        layer: String,

        /// Property key, e.g. line-dasharray
        #[arg()]
        key: String,

        #[command(subcommand)]
        command: DashCommands,
    },

    /// Stamp a name into the style and write the export file
    Export {
        /// Path to the style JSON file
        #[arg()]
        file: PathBuf,

        /// Style name (default: the name from gouache.config.toml)
        #[arg(long)]
        name: Option<String>,

        /// Directory the export lands in
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
    },

    /// Find places by name via the configured geocoder
    Search {
        /// Free-text location query
        #[arg()]
        query: String,

        /// Geocoding access token (overrides config and environment)
        #[arg(long)]
        token: Option<String>,
    },
}

#[derive(Subcommand)]
enum StopsCommands {
    /// List the stops the property currently holds
    List,

    /// Overwrite one stop's zoom level
    SetZoom {
        /// Stop index, starting at 0
        #[arg()]
        index: usize,

        /// New zoom level
        #[arg()]
        zoom: String,
    },

    /// Overwrite one stop's output value
    SetValue {
        /// Stop index, starting at 0
        #[arg()]
        index: usize,

        /// New output value, parsed as JSON when possible
        #[arg()]
        value: String,
    },

    /// Append a stop continuing on from the last one
    Add,

    /// Remove the stop at an index
    Remove {
        /// Stop index, starting at 0
        #[arg()]
        index: usize,
    },
}

#[derive(Subcommand)]
enum MatchCommands {
    /// Show the decoded cases and the default result
    List,

    /// Overwrite the result of one case
    SetCase {
        /// Case index, starting at 0
        #[arg()]
        index: usize,

        /// New result, parsed as JSON when possible
        #[arg()]
        result: String,
    },

    /// Overwrite the fallback result
    SetDefault {
        /// New result, parsed as JSON when possible
        #[arg()]
        result: String,
    },
}

#[derive(Subcommand)]
enum DashCommands {
    /// Overwrite one segment length
    Set {
        /// Segment index, starting at 0
        #[arg()]
        index: usize,

        /// New segment length in pixels
        #[arg()]
        length: String,
    },

    /// Append a 1px segment
    Add,

    /// Remove the segment at an index
    Remove {
        /// Segment index, starting at 0
        #[arg()]
        index: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    match cli.command {
        Commands::Fetch { url, output } => cmd_fetch(url, output),
        Commands::Info { file } => cmd_info(file),
        Commands::Layers {
            file,
            filter,
            query,
        } => cmd_layers(file, &filter, &query),
        Commands::Inspect {
            file,
            layer,
            explain,
        } => cmd_inspect(file, &layer, explain),
        Commands::Set {
            file,
            layer,
            key,
            value,
            layout,
            output,
        } => cmd_set(file, &layer, &key, &value, layout, output),
        Commands::Color {
            file,
            layer,
            key,
            hex,
            output,
        } => cmd_color(file, &layer, &key, &hex, output),
        Commands::Opacity {
            file,
            layer,
            key,
            percent,
            output,
        } => cmd_opacity(file, &layer, &key, percent, output),
        Commands::Toggle {
            file,
            layer,
            output,
        } => cmd_toggle(file, &layer, output),
        Commands::Tint {
            file,
            category,
            hex,
            output,
        } => cmd_tint(file, &category, &hex, output),
        Commands::Stops {
            file,
            layer,
            key,
            command,
        } => cmd_stops(file, &layer, &key, command),
        Commands::Match {
            file,
            layer,
            key,
            command,
        } => cmd_match(file, &layer, &key, command),
        Commands::Dash {
            file,
            layer,
            key,
            command,
        } => cmd_dash(file, &layer, &key, command),
        Commands::Export {
            file,
            name,
            out_dir,
        } => cmd_export(file, name, out_dir),
        Commands::Search { query, token } => cmd_search(&query, token),
    }
}

/// Best-effort config load; without a gouache.config.toml the defaults apply.
fn load_config() -> GouacheConfig {
    GouacheConfig::load_from_file(Path::new("gouache.config.toml")).unwrap_or_else(|_| {
        tracing::debug!("no gouache.config.toml in current directory, using defaults");
        GouacheConfig::default()
    })
}

fn load_document(path: &Path) -> Result<StyleDocument> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    StyleDocument::from_json_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))
}

fn save_document(document: &StyleDocument, path: &Path) -> Result<()> {
    let json = document.to_json_pretty()?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}

fn open_session(path: &Path) -> Result<EditorSession> {
    let config = load_config();
    let document = load_document(path)?;
    Ok(EditorSession::new(document, Box::new(NullRenderer), &config))
}

/// Write the edited document back, in place unless an output path was given.
fn finish_edit(session: &EditorSession, source: &Path, output: Option<PathBuf>) -> Result<()> {
    let target = output.unwrap_or_else(|| source.to_path_buf());
    save_document(session.document(), &target)?;
    println!("   Saved {}", target.display());
    Ok(())
}

fn require_layer(session: &EditorSession, layer_id: &str) -> Result<()> {
    if session.document().layer(layer_id).is_none() {
        anyhow::bail!("layer not found: '{}'", layer_id);
    }
    Ok(())
}

/// Parse a CLI value as JSON, falling back to plain text.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::from(raw))
}

fn parse_number(raw: &str) -> Result<Number> {
    raw.parse::<Number>()
        .with_context(|| format!("not a number: '{}'", raw))
}

fn cmd_fetch(url: Option<String>, output: PathBuf) -> Result<()> {
    let config = load_config();
    let url = url.unwrap_or(config.style.base_url);

    println!("🗺️  Fetching style from {}...", url);
    let source = HttpStyleSource::new();
    let document = source.fetch_style(&url)?;

    save_document(&document, &output)?;
    println!(
        "   ✓ {} layer(s) saved to {}",
        document.layer_count(),
        output.display()
    );
    Ok(())
}

fn cmd_info(file: PathBuf) -> Result<()> {
    let document = load_document(&file)?;

    let name = document
        .name
        .clone()
        .unwrap_or_else(|| "(unnamed)".to_string());
    let visible = document.layers.iter().filter(|l| l.is_visible()).count();

    let mut kinds: std::collections::BTreeMap<&str, usize> = std::collections::BTreeMap::new();
    for layer in &document.layers {
        *kinds.entry(layer.kind.as_str()).or_insert(0) += 1;
    }

    println!("🗺️  {}", name);
    println!("   File: {}", file.display());
    println!("   Layers: {} ({} visible)", document.layer_count(), visible);
    for (kind, count) in kinds {
        println!("      {:12} {}", kind, count);
    }
    Ok(())
}

fn cmd_layers(file: PathBuf, filter: &str, query: &str) -> Result<()> {
    let document = load_document(&file)?;
    let filter: LayerFilter = filter.parse()?;
    let layers = filter_layers(&document, filter, query);

    println!("🗺️  {} layer(s) ({})", layers.len(), filter);
    for layer in layers {
        let marker = if layer.is_visible() { "✓" } else { "·" };
        println!(
            "   {} {:32} {:12} {}",
            marker,
            layer.id.to_string(),
            layer.kind.as_str(),
            layer.display_name()
        );
    }
    Ok(())
}

fn cmd_inspect(file: PathBuf, layer_id: &str, explain: bool) -> Result<()> {
    let document = load_document(&file)?;
    let layer = document
        .layer(layer_id)
        .with_context(|| format!("layer not found: '{}'", layer_id))?;

    println!("🎨 {} ({}, {})", layer.display_name(), layer.id, layer.kind);
    println!(
        "   Visible: {}",
        if layer.is_visible() { "yes" } else { "no" }
    );
    if let Some(source_layer) = &layer.source_layer {
        println!("   Source layer: {}", source_layer);
    }

    for block in [PropertyBlock::Paint, PropertyBlock::Layout] {
        let Some(properties) = layer.block(block) else {
            continue;
        };
        if properties.is_empty() {
            continue;
        }
        println!("   {}:", property::display_label(block.as_str()));
        for (key, value) in properties {
            let kind = PropertyKind::classify(key, value);
            println!("      {:24} {}", key, describe_value(kind, value));
            if explain {
                let help = property::describe(key);
                if !help.is_empty() {
                    println!("         {}", help);
                }
            }
        }
    }
    Ok(())
}

/// One-line summary of a property value, shaped by its classification.
fn describe_value(kind: PropertyKind, value: &Value) -> String {
    match kind {
        PropertyKind::Color => {
            let text = value.as_str().unwrap_or_default();
            format!("color {} ({})", text, hex_from_color_text(text))
        }
        PropertyKind::Opacity => format!("opacity {}%", property::opacity_percent(value)),
        PropertyKind::Dasharray => format!("dash pattern {}", value),
        PropertyKind::Stops => match StopsTable::decode(value) {
            Ok(table) => format!(
                "stops table, {} stop(s), base {}",
                table.stops.len(),
                table.base()
            ),
            Err(_) => format!("stops table {}", value),
        },
        PropertyKind::Interpolate => match InterpolateExpr::decode(value) {
            Ok(ramp) => {
                let mut text = format!("{} interpolation, {} stop(s)", ramp.kind, ramp.stops.len());
                if ramp.kind == InterpolationKind::Exponential {
                    text.push_str(&format!(", base {}", ramp.base()));
                }
                text
            }
            Err(_) => format!("interpolate {}", value),
        },
        PropertyKind::Match => match MatchExpr::decode(value) {
            Ok(decoded) => format!(
                "match on '{}', {} case(s)",
                decoded.property,
                decoded.cases.len()
            ),
            Err(_) => format!("match {}", value),
        },
        PropertyKind::Width | PropertyKind::SimpleNumber => format!("number {}", value),
        PropertyKind::Other => value.to_string(),
    }
}

fn cmd_set(
    file: PathBuf,
    layer_id: &str,
    key: &str,
    raw: &str,
    layout: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut session = open_session(&file)?;
    require_layer(&session, layer_id)?;

    let block = if layout {
        PropertyBlock::Layout
    } else {
        PropertyBlock::Paint
    };
    session.set_property(layer_id, block, key, parse_value(raw));

    println!("✏️  Set {}.{} on '{}'", block, key, layer_id);
    finish_edit(&session, &file, output)
}

fn cmd_color(
    file: PathBuf,
    layer_id: &str,
    key: &str,
    hex: &str,
    output: Option<PathBuf>,
) -> Result<()> {
    let color = Color::from_hex(hex)?;
    let mut session = open_session(&file)?;
    require_layer(&session, layer_id)?;

    session.set_color(layer_id, key, color);
    println!(
        "🎨 {} on '{}' is now {}",
        key,
        layer_id,
        color.to_rgba_string()
    );
    finish_edit(&session, &file, output)
}

fn cmd_opacity(
    file: PathBuf,
    layer_id: &str,
    key: &str,
    percent: f64,
    output: Option<PathBuf>,
) -> Result<()> {
    let mut session = open_session(&file)?;
    require_layer(&session, layer_id)?;

    if !session.set_opacity_percent(layer_id, key, percent) {
        anyhow::bail!("invalid opacity: {}", percent);
    }
    println!(
        "🎨 {} on '{}' is now {}%",
        key,
        layer_id,
        percent.clamp(0.0, 100.0)
    );
    finish_edit(&session, &file, output)
}

fn cmd_toggle(file: PathBuf, layer_id: &str, output: Option<PathBuf>) -> Result<()> {
    let mut session = open_session(&file)?;
    let now_visible = session
        .toggle_visibility(layer_id)
        .with_context(|| format!("layer not found: '{}'", layer_id))?;

    let name = session
        .document()
        .layer(layer_id)
        .map(|l| l.display_name())
        .unwrap_or_else(|| layer_id.to_string());
    println!(
        "👁  {} is now {}",
        name,
        if now_visible { "visible" } else { "hidden" }
    );
    finish_edit(&session, &file, output)
}

fn cmd_tint(file: PathBuf, category: &str, hex: &str, output: Option<PathBuf>) -> Result<()> {
    let category: ColorCategory = category.parse()?;
    let color = Color::from_hex(hex)?;

    let mut session = open_session(&file)?;
    let touched = session.apply_preset(category, color);

    println!(
        "🎨 All {} colors set to {} ({} layer(s))",
        category,
        color.to_rgba_string(),
        touched
    );
    finish_edit(&session, &file, output)
}

fn cmd_stops(file: PathBuf, layer_id: &str, key: &str, command: StopsCommands) -> Result<()> {
    let mut session = open_session(&file)?;
    require_layer(&session, layer_id)?;

    match command {
        StopsCommands::List => {
            let value = session
                .document()
                .layer(layer_id)
                .and_then(|l| l.paint_value(key))
                .with_context(|| format!("layer '{}' has no paint property '{}'", layer_id, key))?;
            return print_ramp(key, value);
        }
        StopsCommands::SetZoom { index, zoom } => {
            let zoom = parse_number(&zoom)?;
            session.update_ramp_stop(layer_id, key, index, StopSlot::Zoom, Value::Number(zoom))?;
            println!("✏️  Stop {} zoom updated on {}.{}", index, layer_id, key);
        }
        StopsCommands::SetValue { index, value } => {
            session.update_ramp_stop(layer_id, key, index, StopSlot::Value, parse_value(&value))?;
            println!("✏️  Stop {} value updated on {}.{}", index, layer_id, key);
        }
        StopsCommands::Add => {
            session.add_ramp_stop(layer_id, key)?;
            println!("✏️  Stop appended to {}.{}", layer_id, key);
        }
        StopsCommands::Remove { index } => {
            session.remove_ramp_stop(layer_id, key, index)?;
            println!("✏️  Stop {} removed from {}.{}", index, layer_id, key);
        }
    }
    finish_edit(&session, &file, None)
}

fn print_ramp(key: &str, value: &Value) -> Result<()> {
    match PropertyKind::classify(key, value) {
        PropertyKind::Stops => {
            let table = StopsTable::decode(value)?;
            println!(
                "🗺️  {} (stops table, {} stop(s), base {})",
                key,
                table.stops.len(),
                table.base()
            );
            for (i, stop) in table.stops.iter().enumerate() {
                println!("   {}  zoom {:>5}  {}", i, stop.zoom, stop.value);
            }
        }
        PropertyKind::Interpolate => {
            let ramp = InterpolateExpr::decode(value)?;
            println!(
                "🗺️  {} ({} interpolation, {} stop(s))",
                key,
                ramp.kind,
                ramp.stops.len()
            );
            for (i, stop) in ramp.stops.iter().enumerate() {
                println!("   {}  zoom {:>5}  {}", i, stop.zoom, stop.value);
            }
        }
        _ => anyhow::bail!("'{}' does not hold zoom stops", key),
    }
    Ok(())
}

fn cmd_match(file: PathBuf, layer_id: &str, key: &str, command: MatchCommands) -> Result<()> {
    let mut session = open_session(&file)?;
    require_layer(&session, layer_id)?;

    match command {
        MatchCommands::List => {
            let value = session
                .document()
                .layer(layer_id)
                .and_then(|l| l.paint_value(key))
                .with_context(|| format!("layer '{}' has no paint property '{}'", layer_id, key))?;
            let decoded = MatchExpr::decode(value)?;

            println!("🗺️  {} matches on '{}'", key, decoded.property);
            for (i, case) in decoded.cases.iter().enumerate() {
                let labels: Vec<String> = case.values().iter().map(Value::to_string).collect();
                println!("   {}  {} => {}", i, labels.join(" | "), case.result);
            }
            println!("   default => {}", decoded.default);
            return Ok(());
        }
        MatchCommands::SetCase { index, result } => {
            session.update_match_case(layer_id, key, index, parse_value(&result))?;
            println!("✏️  Case {} updated on {}.{}", index, layer_id, key);
        }
        MatchCommands::SetDefault { result } => {
            session.update_match_default(layer_id, key, parse_value(&result))?;
            println!("✏️  Default updated on {}.{}", layer_id, key);
        }
    }
    finish_edit(&session, &file, None)
}

fn cmd_dash(file: PathBuf, layer_id: &str, key: &str, command: DashCommands) -> Result<()> {
    let mut session = open_session(&file)?;
    require_layer(&session, layer_id)?;

    match command {
        DashCommands::Set { index, length } => {
            let length = parse_number(&length)?;
            session.update_dash_segment(layer_id, key, index, length)?;
            println!("✏️  Segment {} updated on {}.{}", index, layer_id, key);
        }
        DashCommands::Add => {
            session.add_dash_segment(layer_id, key)?;
            println!("✏️  Segment appended to {}.{}", layer_id, key);
        }
        DashCommands::Remove { index } => {
            session.remove_dash_segment(layer_id, key, index)?;
            println!("✏️  Segment {} removed from {}.{}", index, layer_id, key);
        }
    }
    finish_edit(&session, &file, None)
}

fn cmd_export(file: PathBuf, name: Option<String>, out_dir: PathBuf) -> Result<()> {
    let mut session = open_session(&file)?;
    if let Some(name) = name {
        session.set_style_name(name);
    }

    let export = session.export()?;
    let target = out_dir.join(&export.file_name);
    std::fs::write(&target, &export.json)
        .with_context(|| format!("failed to write {}", target.display()))?;

    let stamped = session.document().name.clone().unwrap_or_default();
    println!("📤 Exported '{}' to {}", stamped, target.display());
    Ok(())
}

fn cmd_search(query: &str, token: Option<String>) -> Result<()> {
    let query = query.trim();
    if query.is_empty() {
        anyhow::bail!("search query is empty");
    }

    let mut config = load_config().geocoding;
    if let Some(token) = token.or_else(|| std::env::var("GOUACHE_GEOCODING_TOKEN").ok()) {
        config.access_token = token;
    }
    if config.access_token.is_empty() {
        anyhow::bail!(
            "no geocoding access token (use --token, GOUACHE_GEOCODING_TOKEN, or gouache.config.toml)"
        );
    }

    let geocoder = HttpGeocoder::new(config);
    let places = geocoder.search(query)?;

    if places.is_empty() {
        println!("🔎 No places found for '{}'", query);
        return Ok(());
    }

    println!("🔎 {} place(s) for '{}'", places.len(), query);
    for (i, place) in places.iter().enumerate() {
        println!("   {}. {} ({})", i + 1, place.name, place.center);
        if let Some(place_name) = &place.place_name {
            println!("      {}", place_name);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_value_json_or_text() {
        assert_eq!(parse_value("0.5"), Value::from(0.5));
        assert_eq!(parse_value("[2, 1]"), serde_json::json!([2, 1]));
        assert_eq!(parse_value("\"quoted\""), Value::from("quoted"));
        assert_eq!(parse_value("#ff0000"), Value::from("#ff0000"));
        assert_eq!(parse_value("not json at all"), Value::from("not json at all"));
    }

    #[test]
    fn test_parse_number_rejects_text() {
        assert_eq!(parse_number("1.5").unwrap(), Number::from_f64(1.5).unwrap());
        assert_eq!(parse_number("7").unwrap(), Number::from(7));
        assert!(parse_number("wide").is_err());
    }

    #[test]
    fn test_describe_value_summaries() {
        let color = Value::from("#ff8800");
        assert_eq!(
            describe_value(PropertyKind::classify("fill-color", &color), &color),
            "color #ff8800 (#ff8800)"
        );

        let opacity = Value::from(0.35);
        assert_eq!(
            describe_value(PropertyKind::classify("fill-opacity", &opacity), &opacity),
            "opacity 35%"
        );

        let ramp = serde_json::json!([
            "interpolate",
            ["exponential", 1.4],
            ["zoom"],
            5, 1,
            15, 10
        ]);
        assert_eq!(
            describe_value(PropertyKind::classify("line-width", &ramp), &ramp),
            "exponential interpolation, 2 stop(s), base 1.4"
        );
    }
}
