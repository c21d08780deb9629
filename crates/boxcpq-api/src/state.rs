use boxcpq_pricing::CostEngine;

#[derive(Clone)]
pub struct AppState {
    pub engine: CostEngine,
}

impl AppState {
    pub fn new(engine: CostEngine) -> Self {
        Self { engine }
    }
}
