//! Builtin Rule Table
//!
//! Curated subcategory rules compiled into the binary. Categories missing
//! here fall back to brand grouping.

use serde::{Deserialize, Serialize};

/// Priority shared by every fallback (brand pseudo-subcategories and `otros`)
pub const FALLBACK_PRIORITY: i32 = 999;

/// Id of the catch-all subcategory
pub const OTHER_SUBCATEGORY_ID: &str = "otros";

pub const OTHER_SUBCATEGORY_NAME: &str = "Otros";

pub const OTHER_SUBCATEGORY_DESCRIPTION: &str = "Otros productos de esta categoría";

pub const BUILTIN_CATEGORIES: &[BuiltinCategory] = &[
    BuiltinCategory {
        key: "procesadores",
        display_name: "Procesadores",
        types: &[
            BuiltinSubcategory {
                id: "intel",
                name: "Intel",
                description: "Procesadores Intel Core, Xeon, Pentium y Celeron",
                keywords: &["intel", "core i", "xeon", "pentium", "celeron"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "amd",
                name: "AMD",
                description: "Procesadores AMD Ryzen, Threadripper y Athlon",
                keywords: &["amd", "ryzen", "threadripper", "athlon"],
                priority: 2,
            },
        ],
    },
    BuiltinCategory {
        key: "tarjetas de video",
        display_name: "Tarjetas de Video",
        types: &[
            BuiltinSubcategory {
                id: "nvidia",
                name: "NVIDIA",
                description: "Tarjetas GeForce RTX y GTX",
                keywords: &["nvidia", "geforce", "rtx", "gtx"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "radeon",
                name: "AMD Radeon",
                description: "Tarjetas AMD Radeon",
                keywords: &["radeon", "rx "],
                priority: 2,
            },
            BuiltinSubcategory {
                id: "intel-arc",
                name: "Intel Arc",
                description: "Tarjetas Intel Arc",
                keywords: &["arc a", "intel arc"],
                priority: 3,
            },
        ],
    },
    BuiltinCategory {
        key: "memorias ram",
        display_name: "Memorias RAM",
        types: &[
            BuiltinSubcategory {
                id: "ddr5",
                name: "DDR5",
                description: "Módulos de memoria DDR5",
                keywords: &["ddr5"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "ddr4",
                name: "DDR4",
                description: "Módulos de memoria DDR4",
                keywords: &["ddr4"],
                priority: 2,
            },
            BuiltinSubcategory {
                id: "sodimm",
                name: "SO-DIMM (Notebook)",
                description: "Memorias para notebook",
                keywords: &["sodimm", "so-dimm", "notebook", "laptop"],
                priority: 3,
            },
        ],
    },
    BuiltinCategory {
        key: "almacenamiento",
        display_name: "Almacenamiento",
        types: &[
            BuiltinSubcategory {
                id: "ssd",
                name: "SSD",
                description: "Unidades de estado sólido SATA y NVMe",
                keywords: &["ssd", "nvme", "m.2", "estado solido", "estado sólido"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "hdd",
                name: "HDD",
                description: "Discos duros mecánicos",
                keywords: &["hdd", "rpm", "mecánico", "mecanico", "disco duro"],
                priority: 2,
            },
            BuiltinSubcategory {
                id: "externos",
                name: "Externos",
                description: "Almacenamiento externo y portátil",
                keywords: &["externo", "portable", "portátil", "usb"],
                priority: 3,
            },
        ],
    },
    BuiltinCategory {
        key: "placas madre",
        display_name: "Placas Madre",
        types: &[
            BuiltinSubcategory {
                id: "intel",
                name: "Socket Intel",
                description: "Placas para procesadores Intel",
                keywords: &["lga", "z790", "b760", "h610", "z690", "b660"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "amd",
                name: "Socket AMD",
                description: "Placas para procesadores AMD",
                keywords: &["am4", "am5", "b550", "b650", "x670", "a520"],
                priority: 2,
            },
        ],
    },
    BuiltinCategory {
        key: "monitores",
        display_name: "Monitores",
        types: &[
            BuiltinSubcategory {
                id: "gamer",
                name: "Gamer",
                description: "Monitores de alta tasa de refresco",
                keywords: &["gamer", "gaming", "144hz", "165hz", "240hz"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "oficina",
                name: "Oficina",
                description: "Monitores para oficina y hogar",
                keywords: &["oficina", "office", "60hz", "75hz"],
                priority: 2,
            },
        ],
    },
    BuiltinCategory {
        key: "perifericos",
        display_name: "Periféricos",
        types: &[
            BuiltinSubcategory {
                id: "teclados",
                name: "Teclados",
                description: "Teclados mecánicos y de membrana",
                keywords: &["teclado", "keyboard"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "mouse",
                name: "Mouse",
                description: "Mouse y mousepads",
                keywords: &["mouse", "raton", "ratón"],
                priority: 2,
            },
            BuiltinSubcategory {
                id: "audio",
                name: "Audio",
                description: "Audífonos, headsets y parlantes",
                keywords: &["audifono", "audífono", "headset", "parlante", "auricular"],
                priority: 3,
            },
        ],
    },
    BuiltinCategory {
        key: "fuentes de poder",
        display_name: "Fuentes de Poder",
        types: &[
            BuiltinSubcategory {
                id: "modular",
                name: "Modular",
                description: "Fuentes modulares y semi modulares",
                keywords: &["modular"],
                priority: 1,
            },
            BuiltinSubcategory {
                id: "certificada",
                name: "Certificada 80 Plus",
                description: "Fuentes con certificación 80 Plus",
                keywords: &["80 plus", "80+", "gold", "bronze", "platinum"],
                priority: 2,
            },
        ],
    },
];

/// Static category definition
#[derive(Debug, Clone)]
pub struct BuiltinCategory {
    /// Lookup key (already lowercase)
    pub key: &'static str,
    pub display_name: &'static str,
    pub types: &'static [BuiltinSubcategory],
}

/// Static subcategory rule
#[derive(Debug, Clone)]
pub struct BuiltinSubcategory {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub keywords: &'static [&'static str],
    /// Lower sorts first
    pub priority: i32,
}

/// Runtime subcategory rule
///
/// Built from the builtin table or from the `[rules]` section of
/// `config.toml`. Keywords are matched as lowercase substrings of the product
/// name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubcategoryRule {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub keywords: Vec<String>,
    #[serde(default = "default_priority")]
    pub priority: i32,
}

fn default_priority() -> i32 {
    FALLBACK_PRIORITY - 1
}

impl From<&BuiltinSubcategory> for SubcategoryRule {
    fn from(builtin: &BuiltinSubcategory) -> Self {
        Self {
            id: builtin.id.to_string(),
            name: builtin.name.to_string(),
            description: Some(builtin.description.to_string()),
            keywords: builtin.keywords.iter().map(|s| s.to_string()).collect(),
            priority: builtin.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_categories_exist() {
        assert!(!BUILTIN_CATEGORIES.is_empty());
        assert!(BUILTIN_CATEGORIES.iter().any(|c| c.key == "almacenamiento"));
        assert!(BUILTIN_CATEGORIES.iter().any(|c| c.key == "procesadores"));
        assert!(!BUILTIN_CATEGORIES.iter().any(|c| c.key == "gabinetes"));
    }

    #[test]
    fn test_builtin_keys_are_lowercase() {
        for cat in BUILTIN_CATEGORIES {
            assert_eq!(cat.key, cat.key.to_lowercase());
            for sub in cat.types {
                assert!(sub.priority < FALLBACK_PRIORITY, "{}/{}", cat.key, sub.id);
                assert!(sub.keywords.iter().all(|k| !k.is_empty()));
            }
        }
    }

    #[test]
    fn test_subcategory_rule_from_builtin() {
        let builtin = &BUILTIN_CATEGORIES[0].types[0];
        let rule = SubcategoryRule::from(builtin);
        assert_eq!(rule.id, builtin.id);
        assert_eq!(rule.priority, builtin.priority);
        assert_eq!(rule.keywords.len(), builtin.keywords.len());
    }
}
