#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RenderableStatus {
    Pass,
    Fail,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RenderableItem {
    pub tag: String,
    pub description: Option<String>,
    /// Exemption reason, for controlled items.
    pub control: Option<String>,
    /// Parameter name; only known for verbose reports.
    pub name: Option<String>,
    pub profile: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderableReport {
    pub status: RenderableStatus,
    pub host: Option<String>,
    pub tags: String,
    pub success: Vec<RenderableItem>,
    pub failure: Vec<RenderableItem>,
    pub controlled: Vec<RenderableItem>,
    /// Rule ids dropped as malformed, with the reason.
    pub skipped: Vec<String>,
}
