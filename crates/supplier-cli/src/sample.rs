//! Bundled sample registry and ledger for the `demo` command.
//!
//! These are never used as a substitute for files that fail to load.

use supplier_model::RegistryEntry;

const REGISTRY: [(&str, &str); 10] = [
    ("UP02164", "2Y COMMUNICATIONS ENGINEERING"),
    ("UP01888", "SKY WORLD CLASSIC"),
    ("UP00003", "ABX EXPRESS (KUCHING) SDN BHD"),
    ("UP00002", "ABU SEMAN MAT AIL"),
    ("UP00005", "CG COMPUTERS SDN. BHD."),
    ("UP00006", "DELCOL WATER SOLUTION SDN BHD"),
    ("UP00007", "DG SOLUTION"),
    ("UP00008", "DISPLAY ASIA SDN. BHD."),
    ("UP00009", "DNA COMPUTER SERVICE CENTRE"),
    ("UP00010", "F H SALES AND SERVICE"),
];

const LEDGER: [&str; 10] = [
    "2Y COMMUNICATIONS ENGINEERING",
    "SKYWORLD CLASSIC",
    "ABX EXPRESS (KUCHING) SDN BHD",
    "ACER SALES & SERVICES SDN BHD",
    "ACTION POINT TECHNOLOGY",
    "CG COMPUTER SDN BHD",
    "DELCOL WATER SOLUTIONS (M) SDN BHD",
    "DG SOLUTION ENTERPRISE",
    "DISPLAY ASIA SDN BHD",
    "DNA COMPUTER SDN BHD",
];

pub fn registry_entries() -> Vec<RegistryEntry> {
    REGISTRY
        .iter()
        .map(|(id, name)| RegistryEntry::new(*id, *name))
        .collect()
}

pub fn ledger_names() -> &'static [&'static str] {
    &LEDGER
}
