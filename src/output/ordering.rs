use crate::hourly::columns::{COL_DATE, COL_END_PERIOD, COL_START_PERIOD};

const UV_MARKER: &str = "UV Index";
const GHI_MARKER: &str = "GHI";

fn is_uv(name: &str) -> bool {
    name.contains(UV_MARKER)
}

fn is_ghi(name: &str) -> bool {
    name.contains(GHI_MARKER)
}

fn is_lag(name: &str) -> bool {
    name.to_lowercase().contains("lag")
}

/// Output column order: the three period columns, everything else in its
/// current order, then UV Index columns, then GHI columns with any GHI lag
/// columns last.
pub fn order_columns(names: &[String]) -> Vec<String> {
    let leading = [COL_DATE, COL_START_PERIOD, COL_END_PERIOD];
    let mut ordered: Vec<String> = leading
        .iter()
        .filter(|lead| names.iter().any(|name| name == *lead))
        .map(|lead| lead.to_string())
        .collect();

    let body = names
        .iter()
        .filter(|name| !leading.contains(&name.as_str()))
        .filter(|name| !is_uv(name) && !is_ghi(name));
    let uv = names.iter().filter(|name| is_uv(name) && !is_ghi(name));
    let ghi = names.iter().filter(|name| is_ghi(name) && !is_lag(name));
    let ghi_lag = names.iter().filter(|name| is_ghi(name) && is_lag(name));

    ordered.extend(body.chain(uv).chain(ghi).chain(ghi_lag).cloned());
    ordered
}
