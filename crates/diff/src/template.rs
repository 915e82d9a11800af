// crates/diff/src/template.rs
//! Top-level layout of a CloudFormation-style template document.

/// Top-level keys whose value is a single scalar-ish value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    FormatVersion,
    Transform,
    Description,
}

impl ScalarField {
    pub const ALL: [Self; 3] = [Self::FormatVersion, Self::Transform, Self::Description];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::FormatVersion => "AWSTemplateFormatVersion",
            Self::Transform => "Transform",
            Self::Description => "Description",
        }
    }
}

/// Top-level keys holding a map of logical id to entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Metadata,
    Parameters,
    Mappings,
    Conditions,
    Resources,
    Outputs,
}

impl Section {
    /// Sections in rendering order.
    pub const ALL: [Self; 6] = [
        Self::Metadata,
        Self::Parameters,
        Self::Mappings,
        Self::Conditions,
        Self::Resources,
        Self::Outputs,
    ];

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::Parameters => "Parameters",
            Self::Mappings => "Mappings",
            Self::Conditions => "Conditions",
            Self::Resources => "Resources",
            Self::Outputs => "Outputs",
        }
    }

    /// Singular noun used in front of each entity line.
    #[must_use]
    pub const fn entity_label(self) -> &'static str {
        match self {
            Self::Metadata => "Metadata",
            Self::Parameters => "Parameter",
            Self::Mappings => "Mapping",
            Self::Conditions => "Condition",
            Self::Resources => "Resource",
            Self::Outputs => "Output",
        }
    }
}

/// Whether `key` is one of the template keys the differ knows about.
#[must_use]
pub fn is_known_key(key: &str) -> bool {
    ScalarField::ALL.iter().any(|f| f.key() == key) || Section::ALL.iter().any(|s| s.key() == key)
}
