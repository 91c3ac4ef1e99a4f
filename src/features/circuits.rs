//! Circuit inventory (VPLS / VPWS / L2VPN services per client).

use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use super::require;
use crate::blob::BlobStore;
use crate::error::{FeatureError, StoreError};
use crate::store::{new_id, RecordStore};
use crate::Record;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitKind {
    #[default]
    #[serde(rename = "VPLS")]
    Vpls,
    #[serde(rename = "VPWS")]
    Vpws,
    #[serde(rename = "L2VPN")]
    L2vpn,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CircuitStatus {
    #[default]
    #[serde(alias = "Ativo")]
    Active,
    #[serde(alias = "Inativo")]
    Inactive,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Record)]
#[record(key = "noc-circuits")]
#[serde(rename_all = "camelCase")]
pub struct Circuit {
    pub id: String,
    #[serde(alias = "cliente")]
    pub client: String,
    #[serde(alias = "parceiro")]
    pub partner: String,
    #[serde(rename = "type", alias = "tipo", default)]
    pub kind: CircuitKind,
    #[serde(default)]
    pub interfaces: String,
    #[serde(default)]
    pub vc_id: String,
    #[serde(default)]
    pub vlans: String,
    #[serde(default)]
    pub status: CircuitStatus,
    #[serde(alias = "observacoes", default)]
    pub notes: String,
    #[serde(alias = "dataRegistro")]
    pub registered_at: DateTime<Utc>,
}

/// Form input for a new circuit; id and registration time are assigned on add.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CircuitDraft {
    pub client: String,
    pub partner: String,
    pub kind: CircuitKind,
    pub interfaces: String,
    pub vc_id: String,
    pub vlans: String,
    pub status: CircuitStatus,
    pub notes: String,
}

impl CircuitDraft {
    pub fn new(client: impl Into<String>, partner: impl Into<String>) -> Self {
        Self {
            client: client.into(),
            partner: partner.into(),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CircuitStats {
    pub total: usize,
    pub active: usize,
    pub inactive: usize,
    pub vpls: usize,
    pub vpws: usize,
    pub l2vpn: usize,
}

pub struct CircuitRegistry<'a, B> {
    store: &'a RecordStore<B>,
}

impl<'a, B: BlobStore> CircuitRegistry<'a, B> {
    pub fn new(store: &'a RecordStore<B>) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Circuit> {
        self.store.collection::<Circuit>().load().into_vec()
    }

    pub fn get(&self, id: &str) -> Option<Circuit> {
        self.store.collection::<Circuit>().get(id)
    }

    /// Register a circuit. Client and partner are required.
    pub fn add(&self, draft: CircuitDraft) -> Result<Circuit, FeatureError> {
        require("circuit", "client", &draft.client)?;
        require("circuit", "partner", &draft.partner)?;

        let circuit = Circuit {
            id: new_id(),
            client: draft.client,
            partner: draft.partner,
            kind: draft.kind,
            interfaces: draft.interfaces,
            vc_id: draft.vc_id,
            vlans: draft.vlans,
            status: draft.status,
            notes: draft.notes,
            registered_at: Utc::now(),
        };
        let stored = self.store.collection::<Circuit>().insert(circuit)?;
        info!("registered {:?} circuit for {}", stored.kind, stored.client);
        Ok(stored)
    }

    /// Delete by id. Returns true if the circuit existed.
    pub fn delete(&self, id: &str) -> Result<bool, FeatureError> {
        Ok(self.store.collection::<Circuit>().delete(id)?)
    }

    /// Counts by status and by service kind.
    pub fn stats(&self) -> CircuitStats {
        self.list()
            .iter()
            .fold(CircuitStats::default(), |mut stats, circuit| {
                stats.total += 1;
                match circuit.status {
                    CircuitStatus::Active => stats.active += 1,
                    CircuitStatus::Inactive => stats.inactive += 1,
                }
                match circuit.kind {
                    CircuitKind::Vpls => stats.vpls += 1,
                    CircuitKind::Vpws => stats.vpws += 1,
                    CircuitKind::L2vpn => stats.l2vpn += 1,
                }
                stats
            })
    }

    /// The whole inventory as a pretty JSON array.
    pub fn export_json(&self) -> Result<String, StoreError> {
        Ok(serde_json::to_string_pretty(&self.list())?)
    }
}
