//! Canonical catalog items, defined by administrators.
//!
//! These exist before any provider registers.

use crate::domain::CatalogDefinition;

pub const DEFAULT_CATALOG_DEFINITIONS: &[CatalogDefinition] = &[
    CatalogDefinition {
        name: "file",
        display_name: "File Storage",
        description: "Basic file storage service",
        resource_kind: "file",
    },
    CatalogDefinition {
        name: "vm",
        display_name: "Virtual Machine",
        description: "Standard virtual machine",
        resource_kind: "vm",
    },
    CatalogDefinition {
        name: "container",
        display_name: "Container",
        description: "Container runtime service",
        resource_kind: "container",
    },
    CatalogDefinition {
        name: "postgresql",
        display_name: "PostgreSQL Database",
        description: "PostgreSQL database service",
        resource_kind: "postgresql",
    },
];
