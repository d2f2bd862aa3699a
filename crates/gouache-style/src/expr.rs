//! The expression codec: decoding of the two supported positional expression
//! forms (interpolate, match) into editable structures, re-encoding back into
//! the exact array shape the renderer expects, and the index-level mutations
//! the editors perform.
//!
//! Interpolate: `["interpolate", [kind, base?], ["zoom"], z1, v1, z2, v2, …]`
//! Match: `["match", ["get", prop], values1, result1, …, default]`
//!
//! Zoom slots and the exponential base are kept as raw JSON numbers so an
//! integer `10` never comes back as `10.0`; decode-then-encode of a
//! well-formed expression reproduces the original array exactly.

use serde_json::{json, Number, Value};

use gouache_core::{GouacheError, GouacheResult};

/// Index of the first (zoom, value) pair in an interpolate array, after the
/// operator, the `[kind, base?]` header, and the `["zoom"]` input.
const INTERPOLATE_STOPS_START: usize = 3;

/// Index of the first (values, result) pair in a match array, after the
/// operator and the `["get", property]` input.
const MATCH_CASES_START: usize = 2;

/// How an interpolate expression eases between stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterpolationKind {
    Linear,
    Exponential,
}

impl InterpolationKind {
    pub fn keyword(&self) -> &'static str {
        match self {
            InterpolationKind::Linear => "linear",
            InterpolationKind::Exponential => "exponential",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "linear" => Some(InterpolationKind::Linear),
            "exponential" => Some(InterpolationKind::Exponential),
            _ => None,
        }
    }
}

impl std::fmt::Display for InterpolationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.keyword())
    }
}

/// One zoom breakpoint of an interpolate expression or stops table.
#[derive(Debug, Clone, PartialEq)]
pub struct Stop {
    /// Zoom level, kept as a raw JSON number.
    pub zoom: Number,
    /// Output value at this zoom.
    pub value: Value,
}

impl Stop {
    pub fn new(zoom: impl Into<Number>, value: Value) -> Self {
        Self {
            zoom: zoom.into(),
            value,
        }
    }

    pub fn zoom_f64(&self) -> f64 {
        self.zoom.as_f64().unwrap_or(0.0)
    }
}

/// Which half of a (zoom, value) stop pair an edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopSlot {
    Zoom,
    Value,
}

impl StopSlot {
    pub(crate) fn offset(self) -> usize {
        match self {
            StopSlot::Zoom => 0,
            StopSlot::Value => 1,
        }
    }
}

/// Editable form of an interpolate expression.
#[derive(Debug, Clone, PartialEq)]
pub struct InterpolateExpr {
    pub kind: InterpolationKind,
    /// Exponential base. `None` re-encodes as an absent header slot.
    base: Option<Number>,
    pub stops: Vec<Stop>,
}

impl InterpolateExpr {
    /// Decode a positional interpolate array.
    ///
    /// The header (`[kind, base?]`) must be well-formed; the stop tail is
    /// walked two elements at a time and a trailing incomplete pair is
    /// silently dropped rather than failing the decode.
    pub fn decode(raw: &Value) -> GouacheResult<Self> {
        let arr = expect_expression(raw, "interpolate")?;
        let header = arr
            .get(1)
            .and_then(Value::as_array)
            .ok_or_else(|| GouacheError::expression("interpolate is missing its [kind, base] header"))?;
        let keyword = header
            .first()
            .and_then(Value::as_str)
            .ok_or_else(|| GouacheError::expression("interpolation kind must be a string"))?;
        let kind = InterpolationKind::from_keyword(keyword).ok_or_else(|| {
            GouacheError::expression(format!("unsupported interpolation kind '{}'", keyword))
        })?;
        let base = header.get(1).and_then(Value::as_number).cloned();

        let tail = arr.get(INTERPOLATE_STOPS_START..).unwrap_or(&[]);
        let mut stops = Vec::with_capacity(tail.len() / 2);
        for pair in tail.chunks_exact(2) {
            let zoom = pair[0]
                .as_number()
                .ok_or_else(|| GouacheError::expression("stop zoom must be a number"))?
                .clone();
            stops.push(Stop {
                zoom,
                value: pair[1].clone(),
            });
        }

        Ok(Self { kind, base, stops })
    }

    /// Re-encode into the positional array form.
    pub fn encode(&self) -> Value {
        let mut header = vec![Value::from(self.kind.keyword())];
        if let Some(base) = &self.base {
            header.push(Value::Number(base.clone()));
        }
        let mut arr = vec![
            Value::from("interpolate"),
            Value::Array(header),
            json!(["zoom"]),
        ];
        for stop in &self.stops {
            arr.push(Value::Number(stop.zoom.clone()));
            arr.push(stop.value.clone());
        }
        Value::Array(arr)
    }

    /// Effective base for exponential easing (1 when unset).
    pub fn base(&self) -> f64 {
        self.base.as_ref().and_then(Number::as_f64).unwrap_or(1.0)
    }
}

/// One case of a match expression.
///
/// The values half is kept as the raw slot it was decoded from — a bare
/// scalar or a list — so re-encoding never rewrites a scalar into a
/// singleton list. It is deliberately not editable: only the result half of
/// a case is.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchCase {
    values: Value,
    pub result: Value,
}

impl MatchCase {
    pub fn new(values: Value, result: Value) -> Self {
        Self { values, result }
    }

    /// The match values as a list; a bare scalar is viewed as a singleton.
    pub fn values(&self) -> &[Value] {
        match &self.values {
            Value::Array(items) => items,
            single => std::slice::from_ref(single),
        }
    }
}

/// Editable form of a match expression.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchExpr {
    /// Feature property the match reads, from `["get", property]`.
    pub property: String,
    pub cases: Vec<MatchCase>,
    /// Result when no case matches.
    pub default: Value,
}

impl MatchExpr {
    /// Decode a positional match array. Case pairs occupy the slots between
    /// the input and the trailing default; a dangling values slot with no
    /// result before the default is silently dropped.
    pub fn decode(raw: &Value) -> GouacheResult<Self> {
        let arr = expect_expression(raw, "match")?;
        let input = arr
            .get(1)
            .and_then(Value::as_array)
            .ok_or_else(|| GouacheError::expression("match is missing its [\"get\", property] input"))?;
        if input.first().and_then(Value::as_str) != Some("get") {
            return Err(GouacheError::expression(
                "match input must be a [\"get\", property] lookup",
            ));
        }
        let property = input
            .get(1)
            .and_then(Value::as_str)
            .ok_or_else(|| GouacheError::expression("match property name must be a string"))?
            .to_string();
        if arr.len() < 3 {
            return Err(GouacheError::expression("match has no default result"));
        }

        let default = arr[arr.len() - 1].clone();
        let mut cases = Vec::new();
        let mut i = MATCH_CASES_START;
        while i + 1 < arr.len() - 1 {
            cases.push(MatchCase {
                values: arr[i].clone(),
                result: arr[i + 1].clone(),
            });
            i += 2;
        }

        Ok(Self {
            property,
            cases,
            default,
        })
    }

    /// Re-encode into the positional array form.
    pub fn encode(&self) -> Value {
        let mut arr = vec![Value::from("match"), json!(["get", self.property])];
        for case in &self.cases {
            arr.push(case.values.clone());
            arr.push(case.result.clone());
        }
        arr.push(self.default.clone());
        Value::Array(arr)
    }
}

/// Check that a value is an expression array opened by `operator` and
/// borrow its elements.
fn expect_expression<'a>(raw: &'a Value, operator: &str) -> GouacheResult<&'a Vec<Value>> {
    let arr = raw
        .as_array()
        .ok_or_else(|| GouacheError::expression(format!("{} expression must be an array", operator)))?;
    if arr.first().and_then(Value::as_str) != Some(operator) {
        return Err(GouacheError::expression(format!(
            "expected a {} expression",
            operator
        )));
    }
    Ok(arr)
}

fn expect_expression_mut<'a>(raw: &'a mut Value, operator: &str) -> GouacheResult<&'a mut Vec<Value>> {
    // Validate on a shared borrow first so the error paths line up with the
    // read-only helper.
    expect_expression(raw, operator)?;
    match raw {
        Value::Array(arr) => Ok(arr),
        _ => unreachable!("validated as an array above"),
    }
}

/// Number of (zoom, value) pairs in a raw interpolate array.
pub fn interpolate_stop_count(raw: &Value) -> usize {
    raw.as_array()
        .map(|arr| arr.len().saturating_sub(INTERPOLATE_STOPS_START) / 2)
        .unwrap_or(0)
}

/// Number of (values, result) pairs in a raw match array.
pub fn match_case_count(raw: &Value) -> usize {
    raw.as_array()
        // One slot is the default; the operator and input take two more.
        .map(|arr| arr.len().saturating_sub(MATCH_CASES_START + 1) / 2)
        .unwrap_or(0)
}

/// Overwrite one half of a stop pair in a raw interpolate array.
pub fn update_interpolate_stop(
    raw: &mut Value,
    stop_index: usize,
    slot: StopSlot,
    new_value: Value,
) -> GouacheResult<()> {
    let len = interpolate_stop_count(raw);
    let arr = expect_expression_mut(raw, "interpolate")?;
    if stop_index >= len {
        return Err(GouacheError::StopIndex {
            index: stop_index,
            len,
        });
    }
    arr[INTERPOLATE_STOPS_START + 2 * stop_index + slot.offset()] = new_value;
    Ok(())
}

/// Append a stop continuing the last one: zoom + 1, value duplicated.
pub fn add_interpolate_stop(raw: &mut Value) -> GouacheResult<()> {
    if interpolate_stop_count(raw) == 0 {
        return Err(GouacheError::expression(
            "interpolate has no stops to extend",
        ));
    }
    let arr = expect_expression_mut(raw, "interpolate")?;
    let last_zoom = arr[arr.len() - 2]
        .as_number()
        .ok_or_else(|| GouacheError::expression("stop zoom must be a number"))?
        .clone();
    let last_value = arr[arr.len() - 1].clone();
    arr.push(Value::Number(bump_zoom(&last_zoom)));
    arr.push(last_value);
    Ok(())
}

/// Remove the (zoom, value) pair at `stop_index`. Removing the only
/// remaining stop is refused — it would leave a malformed expression.
pub fn remove_interpolate_stop(raw: &mut Value, stop_index: usize) -> GouacheResult<()> {
    let len = interpolate_stop_count(raw);
    let arr = expect_expression_mut(raw, "interpolate")?;
    if stop_index >= len {
        return Err(GouacheError::StopIndex {
            index: stop_index,
            len,
        });
    }
    if len <= 1 {
        return Err(GouacheError::LastStop);
    }
    let at = INTERPOLATE_STOPS_START + 2 * stop_index;
    arr.drain(at..at + 2);
    Ok(())
}

/// Overwrite the result half of a match case. The values half has no edit
/// path by design.
pub fn update_match_case_result(
    raw: &mut Value,
    case_index: usize,
    new_value: Value,
) -> GouacheResult<()> {
    let len = match_case_count(raw);
    let arr = expect_expression_mut(raw, "match")?;
    if case_index >= len {
        return Err(GouacheError::CaseIndex {
            index: case_index,
            len,
        });
    }
    arr[MATCH_CASES_START + 2 * case_index + 1] = new_value;
    Ok(())
}

/// Overwrite the trailing default result of a match array.
pub fn update_match_default(raw: &mut Value, new_value: Value) -> GouacheResult<()> {
    let arr = expect_expression_mut(raw, "match")?;
    if arr.len() < 3 {
        return Err(GouacheError::expression("match has no default result"));
    }
    let last = arr.len() - 1;
    arr[last] = new_value;
    Ok(())
}

/// Increment a zoom number, keeping integers integral. At the integer
/// ceiling the bump continues in floating point instead of overflowing.
pub(crate) fn bump_zoom(zoom: &Number) -> Number {
    if let Some(next) = zoom.as_i64().and_then(|i| i.checked_add(1)) {
        Number::from(next)
    } else if let Some(next) = zoom.as_u64().and_then(|u| u.checked_add(1)) {
        Number::from(next)
    } else {
        Number::from_f64(zoom.as_f64().map_or(0.0, |f| f + 1.0)).unwrap_or_else(|| Number::from(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn width_expression() -> Value {
        json!(["interpolate", ["exponential", 1.5], ["zoom"], 5, 1, 10, 4, 15, 12])
    }

    fn color_match() -> Value {
        json!([
            "match",
            ["get", "class"],
            ["river", "canal"],
            "#4a90d9",
            "swamp",
            "#3d6647",
            "#a9c4c4"
        ])
    }

    #[test]
    fn test_decode_interpolate() {
        let expr = InterpolateExpr::decode(&width_expression()).unwrap();
        assert_eq!(expr.kind, InterpolationKind::Exponential);
        assert!((expr.base() - 1.5).abs() < 1e-9);
        assert_eq!(expr.stops.len(), 3);
        assert!((expr.stops[0].zoom_f64() - 5.0).abs() < 1e-9);
        assert_eq!(expr.stops[2].value, json!(12));
    }

    #[test]
    fn test_decode_interpolate_without_base() {
        let raw = json!(["interpolate", ["linear"], ["zoom"], 0, 0.2, 10, 1.0]);
        let expr = InterpolateExpr::decode(&raw).unwrap();
        assert_eq!(expr.kind, InterpolationKind::Linear);
        assert!((expr.base() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_decode_interpolate_truncates_dangling_zoom() {
        let raw = json!(["interpolate", ["linear"], ["zoom"], 0, 1, 10]);
        let expr = InterpolateExpr::decode(&raw).unwrap();
        assert_eq!(expr.stops.len(), 1);
    }

    #[test]
    fn test_decode_interpolate_rejects_bad_header() {
        assert!(InterpolateExpr::decode(&json!(["interpolate"])).is_err());
        assert!(InterpolateExpr::decode(&json!(["interpolate", "linear"])).is_err());
        assert!(
            InterpolateExpr::decode(&json!(["interpolate", ["cubic-bezier"], ["zoom"], 0, 1]))
                .is_err()
        );
        assert!(InterpolateExpr::decode(&json!({"stops": []})).is_err());
    }

    #[test]
    fn test_interpolate_round_trip_is_exact() {
        for raw in [
            width_expression(),
            json!(["interpolate", ["linear"], ["zoom"], 0, 1]),
            json!(["interpolate", ["linear"], ["zoom"], 0, "#102030", 22, "#ffffff"]),
            json!(["interpolate", ["exponential", 2], ["zoom"], 3, 0.5, 8, 2.25]),
        ] {
            let expr = InterpolateExpr::decode(&raw).unwrap();
            assert_eq!(expr.encode(), raw);
        }
    }

    #[test]
    fn test_interpolate_round_trip_keeps_integer_zooms() {
        let raw = json!(["interpolate", ["linear"], ["zoom"], 0, 1, 10, 5]);
        let encoded = InterpolateExpr::decode(&raw).unwrap().encode();
        // 0 must stay an integer literal, not become 0.0.
        assert_eq!(serde_json::to_string(&encoded).unwrap(), serde_json::to_string(&raw).unwrap());
    }

    #[test]
    fn test_update_interpolate_stop() {
        let mut raw = width_expression();
        update_interpolate_stop(&mut raw, 1, StopSlot::Value, json!(6)).unwrap();
        assert_eq!(raw[6], json!(6));
        update_interpolate_stop(&mut raw, 0, StopSlot::Zoom, json!(4)).unwrap();
        assert_eq!(raw[3], json!(4));
    }

    #[test]
    fn test_update_interpolate_stop_out_of_range() {
        let mut raw = width_expression();
        let err = update_interpolate_stop(&mut raw, 3, StopSlot::Zoom, json!(0)).unwrap_err();
        assert!(matches!(err, GouacheError::StopIndex { index: 3, len: 3 }));
    }

    #[test]
    fn test_add_interpolate_stop_continues_last() {
        let mut raw = width_expression();
        let before = raw.as_array().unwrap().len();
        add_interpolate_stop(&mut raw).unwrap();

        let arr = raw.as_array().unwrap();
        assert_eq!(arr.len(), before + 2);
        assert_eq!(interpolate_stop_count(&raw), 4);
        // New stop: previous last zoom + 1, value duplicated.
        assert_eq!(raw[9], json!(16));
        assert_eq!(raw[10], json!(12));
    }

    #[test]
    fn test_add_interpolate_stop_keeps_integer_zoom() {
        let mut raw = json!(["interpolate", ["linear"], ["zoom"], 10, 2]);
        add_interpolate_stop(&mut raw).unwrap();
        assert_eq!(serde_json::to_string(&raw[3]).unwrap(), "10");
        assert_eq!(serde_json::to_string(&raw[5]).unwrap(), "11");
    }

    #[test]
    fn test_bump_zoom_does_not_overflow_at_integer_ceiling() {
        // Positive integers past i64 stay integral in the u64 range.
        let bumped = bump_zoom(&Number::from(i64::MAX));
        assert_eq!(bumped.as_u64(), Some(i64::MAX as u64 + 1));

        // Past u64 the bump continues in floating point.
        let bumped = bump_zoom(&Number::from(u64::MAX));
        let f = bumped.as_f64().unwrap();
        assert!(f.is_finite());
        assert!(f >= u64::MAX as f64);

        assert_eq!(bump_zoom(&Number::from(-3)).as_i64(), Some(-2));
    }

    #[test]
    fn test_remove_interpolate_stop_preserves_order() {
        let mut raw = width_expression();
        remove_interpolate_stop(&mut raw, 1).unwrap();
        assert_eq!(
            raw,
            json!(["interpolate", ["exponential", 1.5], ["zoom"], 5, 1, 15, 12])
        );
    }

    #[test]
    fn test_remove_last_remaining_stop_is_refused() {
        let mut raw = json!(["interpolate", ["linear"], ["zoom"], 0, 1]);
        let err = remove_interpolate_stop(&mut raw, 0).unwrap_err();
        assert!(matches!(err, GouacheError::LastStop));
        // Untouched on failure.
        assert_eq!(interpolate_stop_count(&raw), 1);
    }

    #[test]
    fn test_decode_match() {
        let expr = MatchExpr::decode(&color_match()).unwrap();
        assert_eq!(expr.property, "class");
        assert_eq!(expr.cases.len(), 2);
        assert_eq!(expr.cases[0].values(), [json!("river"), json!("canal")]);
        // Bare scalar viewed as a singleton list.
        assert_eq!(expr.cases[1].values(), [json!("swamp")]);
        assert_eq!(expr.default, json!("#a9c4c4"));
    }

    #[test]
    fn test_decode_match_rejects_bad_input() {
        assert!(MatchExpr::decode(&json!(["match"])).is_err());
        assert!(MatchExpr::decode(&json!(["match", ["zoom"], "#fff"])).is_err());
        assert!(MatchExpr::decode(&json!(["match", ["get", 3], "#fff"])).is_err());
    }

    #[test]
    fn test_match_round_trip_is_exact() {
        // The bare "swamp" scalar must not come back wrapped in a list.
        let raw = color_match();
        let expr = MatchExpr::decode(&raw).unwrap();
        assert_eq!(expr.encode(), raw);
    }

    #[test]
    fn test_match_decode_drops_dangling_values_slot() {
        let raw = json!(["match", ["get", "class"], ["a"], "#fff", ["b"], "#000"]);
        // Even element count: the ["b"] slot has no result before the
        // default, so it is dropped.
        let expr = MatchExpr::decode(&raw).unwrap();
        assert_eq!(expr.cases.len(), 1);
        assert_eq!(expr.default, json!("#000"));
    }

    #[test]
    fn test_update_match_case_result() {
        let mut raw = color_match();
        update_match_case_result(&mut raw, 1, json!("#224433")).unwrap();
        assert_eq!(raw[5], json!("#224433"));
        // Values slot untouched.
        assert_eq!(raw[4], json!("swamp"));
    }

    #[test]
    fn test_update_match_case_out_of_range() {
        let mut raw = color_match();
        let err = update_match_case_result(&mut raw, 2, json!("#fff")).unwrap_err();
        assert!(matches!(err, GouacheError::CaseIndex { index: 2, len: 2 }));
    }

    #[test]
    fn test_update_match_default() {
        let mut raw = color_match();
        update_match_default(&mut raw, json!("#123456")).unwrap();
        assert_eq!(raw[6], json!("#123456"));
    }

    #[test]
    fn test_case_counts() {
        assert_eq!(match_case_count(&color_match()), 2);
        assert_eq!(match_case_count(&json!(["match", ["get", "x"], "#fff"])), 0);
        assert_eq!(interpolate_stop_count(&width_expression()), 3);
        assert_eq!(interpolate_stop_count(&json!("#fff")), 0);
    }
}
