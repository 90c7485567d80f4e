use serde::Deserialize;

/// Window parameters, accepted either as query-string values on GET or as a
/// JSON body on POST.
#[derive(Debug, Clone, Deserialize)]
pub struct WindowQuery {
    #[serde(rename = "T")]
    pub time: String,
    #[serde(rename = "dT")]
    pub tolerance: String,
}
