#![allow(dead_code)]

use noc_toolkit::{CircuitDraft, CircuitKind, InMemoryBlobStore, RecordStore};

pub const DEFAULT_COMMANDS: &str = r#"[
    {"comando": "show ip bgp summary", "dispositivo": "Cisco", "protocolo": "BGP", "tarefa": "Peer status", "descricao": "Summary of BGP neighbors"},
    {"comando": "show ip ospf neighbor", "dispositivo": "Cisco", "protocolo": "OSPF", "tarefa": "Adjacencies", "descricao": "OSPF neighbor table"},
    {"comando": "display bgp peer", "dispositivo": "Huawei", "protocolo": "BGP", "tarefa": "Peer status", "descricao": "BGP peer table"},
    {"comando": "show l2vpn atom vc", "dispositivo": "Cisco", "protocolo": "MPLS", "tarefa": "VC status", "descricao": "L2VPN virtual circuits"},
    {"comando": "show vlan", "dispositivo": "Datacom", "protocolo": "L2", "tarefa": "VLANs", "descricao": "Configured VLANs"}
]"#;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn memory_store() -> (InMemoryBlobStore, RecordStore<InMemoryBlobStore>) {
    init_logging();
    let blobs = InMemoryBlobStore::new();
    let store = RecordStore::new(blobs.clone());
    (blobs, store)
}

pub fn vpls(client: &str) -> CircuitDraft {
    CircuitDraft {
        kind: CircuitKind::Vpls,
        interfaces: "Gi0/0/1.100".into(),
        vc_id: "100".into(),
        vlans: "100".into(),
        ..CircuitDraft::new(client, "Carrier")
    }
}
