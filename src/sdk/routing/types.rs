use serde::Deserialize;

// --- Wire format of the routing service. Unused fields are ignored. ---

#[derive(Debug, Clone, Deserialize)]
pub struct RoutingResponse {
    pub message: Message,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    #[serde(default)]
    pub routes: Vec<RawRoute>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawRoute {
    #[serde(default)]
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Section {
    #[serde(default)]
    pub transport: Option<Transport>,
    #[serde(rename = "type", default)]
    pub section_type: Option<String>,
    pub summary: SectionSummary,
    #[serde(default)]
    pub polyline: Option<PolylineField>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Transport {
    #[serde(default)]
    pub mode: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct SectionSummary {
    pub duration: f64,
    pub length: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PolylineField {
    #[serde(default)]
    pub polyline: Vec<[f64; 2]>,
}

impl Section {
    /// `transport.mode`, else the section `type`. Empty strings count as absent.
    pub fn mode(&self) -> Option<&str> {
        self.transport
            .as_ref()
            .and_then(|t| t.mode.as_deref())
            .filter(|m| !m.is_empty())
            .or_else(|| self.section_type.as_deref().filter(|t| !t.is_empty()))
    }

    /// Raw `[lat, lon]` vertices; empty when the section carries no polyline.
    pub fn path(&self) -> &[[f64; 2]] {
        self.polyline
            .as_ref()
            .map(|p| p.polyline.as_slice())
            .unwrap_or(&[])
    }
}
