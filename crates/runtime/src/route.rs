use foundation::LocationId;

const AR_PREFIX: &str = "#/ar/";

/// Where a URL fragment points.
///
/// Contract:
/// - `""` and `"#"` → `Map`
/// - `"#/ar/<digits>"` → `Ar(id)` (ASCII digits only, nothing after them)
/// - anything else → `NotFound`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Map,
    Ar(LocationId),
    NotFound,
}

impl Route {
    pub fn parse(fragment: &str) -> Route {
        if fragment.is_empty() || fragment == "#" {
            return Route::Map;
        }
        match fragment.strip_prefix(AR_PREFIX) {
            Some(digits) if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) => {
                Route::Ar(LocationId::new(digits))
            }
            _ => Route::NotFound,
        }
    }

    /// Canonical fragment for this route. `NotFound` has none.
    pub fn fragment(&self) -> Option<String> {
        match self {
            Route::Map => Some("#".to_string()),
            Route::Ar(id) => Some(format!("{AR_PREFIX}{id}")),
            Route::NotFound => None,
        }
    }
}
