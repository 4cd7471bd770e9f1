use serde::{Deserialize, Serialize};

/// Dashboard numbers for a trainer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainerStats {
    /// Every client in the system, not only this trainer's hires
    pub active_clients: u64,
    pub plans_active: u64,
}

/// Progress numbers for anyone who logs workouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientStats {
    pub streak: u32,
    pub workouts_completed: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Stats {
    Trainer(TrainerStats),
    Client(ClientStats),
}
