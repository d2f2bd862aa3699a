use serde_json::Value;

/// Keys edited with a plain number input even though they match none of the
/// broader categories.
const SIMPLE_NUMBER_KEYS: [&str; 6] = [
    "blur",
    "offset",
    "radius",
    "translate",
    "halo-width",
    "halo-blur",
];

/// The recognized shapes a paint/layout property value can take.
///
/// Classification happens once, up front, from the property key and its
/// current value; mutation paths then dispatch on the tag instead of
/// re-inspecting the raw JSON shape at every site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyKind {
    /// Dash pattern: ordered sequence of numbers.
    Dasharray,
    /// Legacy `{ "stops": [[zoom, value], …] }` table.
    Stops,
    /// `["match", ["get", property], …]` expression.
    Match,
    /// `["interpolate", [kind, base?], ["zoom"], …]` expression.
    Interpolate,
    /// Plain color string in hex or rgba text form.
    Color,
    /// Opacity in `0.0..=1.0`, shown as a percentage.
    Opacity,
    /// Width in pixels.
    Width,
    /// Any other plain numeric property.
    SimpleNumber,
    /// No dedicated editor; shown read-only.
    Other,
}

impl PropertyKind {
    /// Classify a property by key and current value. First match wins, in
    /// this order: dasharray, stops table, match, interpolate, color,
    /// opacity, width, simple number.
    pub fn classify(key: &str, value: &Value) -> PropertyKind {
        if key.contains("dasharray") {
            return PropertyKind::Dasharray;
        }
        if is_stops_object(value) {
            return PropertyKind::Stops;
        }
        if is_expression(value, "match") {
            return PropertyKind::Match;
        }
        if is_expression(value, "interpolate") {
            return PropertyKind::Interpolate;
        }
        if key.contains("color") && is_color_text(value) {
            return PropertyKind::Color;
        }
        if key.contains("opacity") {
            return PropertyKind::Opacity;
        }
        if key.contains("width") {
            return PropertyKind::Width;
        }
        if SIMPLE_NUMBER_KEYS.iter().any(|frag| key.contains(frag)) {
            return PropertyKind::SimpleNumber;
        }
        PropertyKind::Other
    }
}

fn is_stops_object(value: &Value) -> bool {
    value
        .as_object()
        .and_then(|obj| obj.get("stops"))
        .is_some_and(Value::is_array)
}

fn is_expression(value: &Value, operator: &str) -> bool {
    value.as_array().and_then(|arr| arr.first()).and_then(Value::as_str) == Some(operator)
}

fn is_color_text(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| s.starts_with('#') || s.starts_with("rgba"))
}

/// Title-case a single word: first char uppercased, rest untouched.
pub(crate) fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Human-readable label for a property key: `line-gap-width` → `Line Gap Width`.
pub fn display_label(key: &str) -> String {
    key.split('-')
        .map(title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Opacity as a whole percentage for display. Non-numeric values show as 100.
pub fn opacity_percent(value: &Value) -> i64 {
    value
        .as_f64()
        .map(|v| (v * 100.0).round() as i64)
        .unwrap_or(100)
}

/// Long-form description of a property, keyed by exact name. Informational
/// only; an empty string means no description is available.
pub fn describe(key: &str) -> &'static str {
    match key {
        // line
        "line-dasharray" => "Pattern of dashes and gaps for dashed lines. Example: [3, 0.5] = 3px dash, 0.5px gap. Used for railways, borders, etc.",
        "line-gap-width" => "Creates space between parallel lines (double-line effect). Commonly used for highways and major roads to show separate lanes.",
        "line-width" => "Thickness of the line in pixels. For roads, buildings, borders. Can vary by zoom level for better visibility at different map scales.",
        "line-blur" => "Softens line edges. 0 = sharp edge, higher values = softer/blurred edge. Useful for subtle water boundaries or atmospheric effects.",
        "line-color" => "Color of the line. Used for roads (black/white), water boundaries (blue), building outlines, borders, etc.",
        "line-opacity" => "Transparency of the line. 0 = completely invisible, 1 = fully opaque. Use lower values for subtle features.",
        "line-offset" => "Shifts the line perpendicular to its direction. Positive values move right, negative move left. Used for road casings.",
        // fill
        "fill-color" => "Color that fills polygons like water bodies, parks, buildings, land areas. The main visible color of the feature.",
        "fill-opacity" => "Transparency of polygon fills. 0 = see-through, 1 = solid. Lower values let multiple layers show through.",
        "fill-outline-color" => "Color of the polygon outline/border. Creates definition between adjacent areas.",
        "fill-pattern" => "Uses a sprite image to fill the polygon with a pattern instead of solid color.",
        // background
        "background-color" => "The base map background color. Shows when no other layers are visible (ocean, space outside map).",
        "background-opacity" => "Transparency of the background. Usually kept at 1 (fully opaque).",
        "background-pattern" => "Uses a sprite image pattern for the background instead of solid color.",
        // circle
        "circle-radius" => "Size of circle markers in pixels. Used for points of interest, cities, markers. Can scale with zoom.",
        "circle-color" => "Fill color of circle markers.",
        "circle-blur" => "Blur amount for circles. Creates soft edges. 0 = sharp, 1 = very soft.",
        "circle-opacity" => "Transparency of circle fill. 0 = invisible, 1 = solid.",
        "circle-stroke-width" => "Width of the circle outline in pixels.",
        "circle-stroke-color" => "Color of the circle outline.",
        "circle-stroke-opacity" => "Transparency of the circle outline.",
        // text
        "text-color" => "Color of text labels (street names, place names, etc.).",
        "text-halo-width" => "Width of text outline/halo in pixels. Makes text readable over busy backgrounds.",
        "text-halo-blur" => "Blur applied to text halo. Softens the outline.",
        "text-halo-color" => "Color of text halo/outline. Usually white or light color for dark text, dark for light text.",
        "text-opacity" => "Transparency of text. 0 = invisible, 1 = fully visible.",
        "text-size" => "Font size in pixels. Can vary by zoom level to keep labels readable.",
        // icon
        "icon-size" => "Scale of icon symbols. 1 = original size, 0.5 = half size, 2 = double size.",
        "icon-opacity" => "Transparency of icons. 0 = invisible, 1 = fully visible.",
        "icon-color" => "Tint color applied to icons.",
        "icon-halo-width" => "Width of icon halo/outline in pixels.",
        "icon-halo-color" => "Color of icon halo/outline.",
        // raster
        "raster-opacity" => "Transparency of raster layers (satellite imagery, hillshade). 0 = invisible, 1 = opaque.",
        "raster-brightness-min" => "Minimum brightness for raster layers. -1 = very dark, 0 = normal.",
        "raster-brightness-max" => "Maximum brightness for raster layers. 0 = normal, 1 = very bright.",
        "raster-contrast" => "Contrast adjustment for raster layers. -1 = low contrast, 1 = high contrast.",
        "raster-saturation" => "Color saturation for raster layers. -1 = grayscale, 0 = normal, 1 = oversaturated.",
        _ => "",
    }
}
