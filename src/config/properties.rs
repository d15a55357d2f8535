//! Typed property tree bound under the `jsf` prefix
//!
//! Field names are the property names the binder matches
//! (`jsf.primefaces.mobile.theme`); each field's schema entry declares the
//! init-parameter key it is exported under.

use crate::error::InitParamsError;
use crate::export::{FieldKind, FieldSpec, LeafValue, Schema, Symbolic, TypeRef, ValueKind};
use serde::{Deserialize, Serialize};

/// Init-parameter names understood by the JSF runtime
pub mod faces_params {
    pub const PROJECT_STAGE: &str = "javax.faces.PROJECT_STAGE";
    pub const STATE_SAVING_METHOD: &str = "javax.faces.STATE_SAVING_METHOD";
    pub const FACELETS_REFRESH_PERIOD: &str = "javax.faces.FACELETS_REFRESH_PERIOD";
    pub const FACELETS_SKIP_COMMENTS: &str = "javax.faces.FACELETS_SKIP_COMMENTS";
    pub const FACELETS_SUFFIX: &str = "javax.faces.FACELETS_SUFFIX";
}

/// Init-parameter names understood by PrimeFaces 5.0
pub mod primefaces_params {
    pub const THEME: &str = "primefaces.THEME";
    pub const MOBILE_THEME: &str = "primefaces.mobile.THEME";
    pub const AUTO_UPDATE: &str = "primefaces.AUTO_UPDATE";
    pub const PUSH_SERVER_URL: &str = "primefaces.PUSH_SERVER_URL";
    pub const SUBMIT: &str = "primefaces.SUBMIT";
    pub const DIRECTION: &str = "primefaces.DIR";
    pub const RESET_VALUES: &str = "primefaces.RESET_VALUES";
    pub const SECRET_KEY: &str = "primefaces.SECRET";
    pub const CLIENT_SIDE_VALIDATION: &str = "primefaces.CLIENT_SIDE_VALIDATION";
    pub const UPLOADER: &str = "primefaces.UPLOADER";
    pub const TRANSFORM_METADATA: &str = "primefaces.TRANSFORM_METADATA";
    pub const CACHE_PROVIDER: &str = "primefaces.CACHE_PROVIDER";
    pub const PRIVATE_CAPTCHA_KEY: &str = "primefaces.PRIVATE_CAPTCHA_KEY";
    pub const PUBLIC_CAPTCHA_KEY: &str = "primefaces.PUBLIC_CAPTCHA_KEY";

    pub const EHCACHE_PROVIDER: &str = "org.primefaces.cache.EHCacheProvider";
    pub const HAZELCAST_PROVIDER: &str = "org.primefaces.cache.HazelcastCacheProvider";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum ProjectStage {
    Development,
    UnitTest,
    SystemTest,
    Production,
}

impl TryFrom<String> for ProjectStage {
    type Error = InitParamsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_symbol(
            &value,
            &[
                ProjectStage::Development,
                ProjectStage::UnitTest,
                ProjectStage::SystemTest,
                ProjectStage::Production,
            ],
        )
    }
}

impl Symbolic for ProjectStage {
    fn symbol(&self) -> &'static str {
        match self {
            ProjectStage::Development => "Development",
            ProjectStage::UnitTest => "UnitTest",
            ProjectStage::SystemTest => "SystemTest",
            ProjectStage::Production => "Production",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(rename_all = "lowercase")]
pub enum StateSavingMethod {
    Client,
    Server,
}

impl TryFrom<String> for StateSavingMethod {
    type Error = InitParamsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_symbol(&value, &[StateSavingMethod::Client, StateSavingMethod::Server])
    }
}

impl Symbolic for StateSavingMethod {
    fn symbol(&self) -> &'static str {
        match self {
            StateSavingMethod::Client => "client",
            StateSavingMethod::Server => "server",
        }
    }
}

/// Ajax submit mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(rename_all = "lowercase")]
pub enum SubmitMode {
    Full,
    Partial,
}

impl TryFrom<String> for SubmitMode {
    type Error = InitParamsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_symbol(&value, &[SubmitMode::Full, SubmitMode::Partial])
    }
}

impl Symbolic for SubmitMode {
    fn symbol(&self) -> &'static str {
        match self {
            SubmitMode::Full => "full",
            SubmitMode::Partial => "partial",
        }
    }
}

/// Text orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ltr,
    Rtl,
}

impl TryFrom<String> for Direction {
    type Error = InitParamsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_symbol(&value, &[Direction::Ltr, Direction::Rtl])
    }
}

impl Symbolic for Direction {
    fn symbol(&self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
#[serde(rename_all = "lowercase")]
pub enum UploaderMode {
    Auto,
    Native,
    Commons,
}

impl TryFrom<String> for UploaderMode {
    type Error = InitParamsError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        parse_symbol(
            &value,
            &[UploaderMode::Auto, UploaderMode::Native, UploaderMode::Commons],
        )
    }
}

impl Symbolic for UploaderMode {
    fn symbol(&self) -> &'static str {
        match self {
            UploaderMode::Auto => "auto",
            UploaderMode::Native => "native",
            UploaderMode::Commons => "commons",
        }
    }
}

// Matches ignoring ASCII case, so `RTL` binds as `rtl`.
fn parse_symbol<S: Symbolic + Copy>(value: &str, choices: &[S]) -> Result<S, InitParamsError> {
    let value = value.trim();
    choices
        .iter()
        .copied()
        .find(|choice| choice.symbol().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            let expected: Vec<&str> = choices.iter().map(|c| c.symbol()).collect();
            InitParamsError::config(format!(
                "unknown value '{}', expected one of: {}",
                value,
                expected.join(", ")
            ))
        })
}

fn symbol<S: Symbolic>(value: &Option<S>) -> Option<LeafValue> {
    value.as_ref().map(|s| LeafValue::Symbol(s.symbol()))
}

fn text(value: &Option<String>) -> Option<LeafValue> {
    value.clone().map(LeafValue::Text)
}

/// Root of the property tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JsfProperties {
    pub faces: FacesProperties,
    pub primefaces: PrimefacesProperties,
}

static JSF_FIELDS: &[FieldSpec<JsfProperties>] = &[
    FieldSpec {
        name: "faces",
        description: "Core JSF runtime parameters",
        kind: FieldKind::Nested { get: |p| &p.faces },
    },
    FieldSpec {
        name: "primefaces",
        description: "PrimeFaces component library parameters",
        kind: FieldKind::Nested {
            get: |p| &p.primefaces,
        },
    },
];

impl Schema for JsfProperties {
    fn schema() -> &'static [FieldSpec<Self>] {
        JSF_FIELDS
    }
}

/// Core JSF parameters. All unset by default, leaving the runtime's own
/// defaults in place.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacesProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_stage: Option<ProjectStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_saving_method: Option<StateSavingMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facelets_refresh_period: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facelets_skip_comments: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub facelets_suffix: Option<String>,
}

static FACES_FIELDS: &[FieldSpec<FacesProperties>] = &[
    FieldSpec {
        name: "project_stage",
        description: "Project stage: Development, UnitTest, SystemTest or Production",
        kind: FieldKind::Leaf {
            key: faces_params::PROJECT_STAGE,
            value_kind: ValueKind::Symbol,
            get: |f| symbol(&f.project_stage),
        },
    },
    FieldSpec {
        name: "state_saving_method",
        description: "Where view state is kept, client or server",
        kind: FieldKind::Leaf {
            key: faces_params::STATE_SAVING_METHOD,
            value_kind: ValueKind::Symbol,
            get: |f| symbol(&f.state_saving_method),
        },
    },
    FieldSpec {
        name: "facelets_refresh_period",
        description: "Seconds between facelet change checks, -1 disables",
        kind: FieldKind::Leaf {
            key: faces_params::FACELETS_REFRESH_PERIOD,
            value_kind: ValueKind::Integer,
            get: |f| f.facelets_refresh_period.map(LeafValue::Integer),
        },
    },
    FieldSpec {
        name: "facelets_skip_comments",
        description: "Strip XML comments from facelet output",
        kind: FieldKind::Leaf {
            key: faces_params::FACELETS_SKIP_COMMENTS,
            value_kind: ValueKind::Bool,
            get: |f| f.facelets_skip_comments.map(LeafValue::Bool),
        },
    },
    FieldSpec {
        name: "facelets_suffix",
        description: "File suffix of facelet views",
        kind: FieldKind::Leaf {
            key: faces_params::FACELETS_SUFFIX,
            value_kind: ValueKind::Text,
            get: |f| text(&f.facelets_suffix),
        },
    },
];

impl Schema for FacesProperties {
    fn schema() -> &'static [FieldSpec<Self>] {
        FACES_FIELDS
    }
}

/// PrimeFaces 5.0 parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrimefacesProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
    pub mobile: MobileProperties,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_update: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub push_server_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submit: Option<SubmitMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dir: Option<Direction>,
    pub reset_values: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    pub client_side_validation: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uploader: Option<UploaderMode>,
    pub transform_metadata: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cache_provider: Option<TypeRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub private_captcha_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_captcha_key: Option<String>,
}

impl Default for PrimefacesProperties {
    fn default() -> Self {
        Self {
            theme: Some("aristo".to_string()),
            mobile: MobileProperties::default(),
            auto_update: None,
            push_server_url: None,
            submit: Some(SubmitMode::Full),
            dir: Some(Direction::Ltr),
            reset_values: false,
            secret: Some("primefaces".to_string()),
            client_side_validation: false,
            uploader: Some(UploaderMode::Auto),
            transform_metadata: false,
            cache_provider: None,
            private_captcha_key: None,
            public_captcha_key: None,
        }
    }
}

static PRIMEFACES_FIELDS: &[FieldSpec<PrimefacesProperties>] = &[
    FieldSpec {
        name: "theme",
        description: "Theme of the application",
        kind: FieldKind::Leaf {
            key: primefaces_params::THEME,
            value_kind: ValueKind::Text,
            get: |p| text(&p.theme),
        },
    },
    FieldSpec {
        name: "mobile",
        description: "PrimeFaces Mobile parameters",
        kind: FieldKind::Nested { get: |p| &p.mobile },
    },
    FieldSpec {
        name: "auto_update",
        description: "Global auto update of ajax components",
        kind: FieldKind::Leaf {
            key: primefaces_params::AUTO_UPDATE,
            value_kind: ValueKind::Text,
            get: |p| text(&p.auto_update),
        },
    },
    FieldSpec {
        name: "push_server_url",
        description: "Custom server url for PrimeFaces Push",
        kind: FieldKind::Leaf {
            key: primefaces_params::PUSH_SERVER_URL,
            value_kind: ValueKind::Text,
            get: |p| text(&p.push_server_url),
        },
    },
    FieldSpec {
        name: "submit",
        description: "Ajax submit mode, full or partial",
        kind: FieldKind::Leaf {
            key: primefaces_params::SUBMIT,
            value_kind: ValueKind::Symbol,
            get: |p| symbol(&p.submit),
        },
    },
    FieldSpec {
        name: "dir",
        description: "Orientation, ltr or rtl",
        kind: FieldKind::Leaf {
            key: primefaces_params::DIRECTION,
            value_kind: ValueKind::Symbol,
            get: |p| symbol(&p.dir),
        },
    },
    FieldSpec {
        name: "reset_values",
        description: "Reset ajax updated inputs first",
        kind: FieldKind::Leaf {
            key: primefaces_params::RESET_VALUES,
            value_kind: ValueKind::Bool,
            get: |p| Some(LeafValue::Bool(p.reset_values)),
        },
    },
    FieldSpec {
        name: "secret",
        description: "Secret key for value expressions exposed in streamed content",
        kind: FieldKind::Leaf {
            key: primefaces_params::SECRET_KEY,
            value_kind: ValueKind::Text,
            get: |p| text(&p.secret),
        },
    },
    FieldSpec {
        name: "client_side_validation",
        description: "Enable client side validation",
        kind: FieldKind::Leaf {
            key: primefaces_params::CLIENT_SIDE_VALIDATION,
            value_kind: ValueKind::Bool,
            get: |p| Some(LeafValue::Bool(p.client_side_validation)),
        },
    },
    FieldSpec {
        name: "uploader",
        description: "Uploader mode: auto, native or commons",
        kind: FieldKind::Leaf {
            key: primefaces_params::UPLOADER,
            value_kind: ValueKind::Symbol,
            get: |p| symbol(&p.uploader),
        },
    },
    FieldSpec {
        name: "transform_metadata",
        description: "Transform bean validation metadata to html attributes",
        kind: FieldKind::Leaf {
            key: primefaces_params::TRANSFORM_METADATA,
            value_kind: ValueKind::Bool,
            get: |p| Some(LeafValue::Bool(p.transform_metadata)),
        },
    },
    FieldSpec {
        name: "cache_provider",
        description: "Cache provider class, EHCache or Hazelcast",
        kind: FieldKind::Leaf {
            key: primefaces_params::CACHE_PROVIDER,
            value_kind: ValueKind::TypeRef,
            get: |p| p.cache_provider.clone().map(LeafValue::Type),
        },
    },
    FieldSpec {
        name: "private_captcha_key",
        description: "Private reCaptcha key",
        kind: FieldKind::Leaf {
            key: primefaces_params::PRIVATE_CAPTCHA_KEY,
            value_kind: ValueKind::Text,
            get: |p| text(&p.private_captcha_key),
        },
    },
    FieldSpec {
        name: "public_captcha_key",
        description: "Public reCaptcha key",
        kind: FieldKind::Leaf {
            key: primefaces_params::PUBLIC_CAPTCHA_KEY,
            value_kind: ValueKind::Text,
            get: |p| text(&p.public_captcha_key),
        },
    },
];

impl Schema for PrimefacesProperties {
    fn schema() -> &'static [FieldSpec<Self>] {
        PRIMEFACES_FIELDS
    }
}

/// Nested properties under `primefaces.mobile`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MobileProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,
}

static MOBILE_FIELDS: &[FieldSpec<MobileProperties>] = &[FieldSpec {
    name: "theme",
    description: "Theme of the mobile application",
    kind: FieldKind::Leaf {
        key: primefaces_params::MOBILE_THEME,
        value_kind: ValueKind::Text,
        get: |m| text(&m.theme),
    },
}];

impl Schema for MobileProperties {
    fn schema() -> &'static [FieldSpec<Self>] {
        MOBILE_FIELDS
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::{describe_schema, ParameterExporter};
    use std::collections::HashSet;

    #[test]
    fn test_primefaces_defaults() {
        let parameters = ParameterExporter::new()
            .export(&PrimefacesProperties::default())
            .unwrap();

        assert_eq!(parameters.get(primefaces_params::THEME), Some("aristo"));
        assert_eq!(parameters.get(primefaces_params::SUBMIT), Some("full"));
        assert_eq!(parameters.get(primefaces_params::DIRECTION), Some("ltr"));
        assert_eq!(parameters.get(primefaces_params::SECRET_KEY), Some("primefaces"));
        assert_eq!(parameters.get(primefaces_params::UPLOADER), Some("auto"));
        assert_eq!(parameters.get(primefaces_params::RESET_VALUES), Some("false"));
        assert!(!parameters.contains_key(primefaces_params::MOBILE_THEME));
        assert!(!parameters.contains_key(primefaces_params::CACHE_PROVIDER));
        assert!(!parameters.contains_key(primefaces_params::PRIVATE_CAPTCHA_KEY));
    }

    #[test]
    fn test_faces_defaults_export_nothing() {
        let parameters = ParameterExporter::new()
            .export(&FacesProperties::default())
            .unwrap();
        assert!(parameters.is_empty());
    }

    #[test]
    fn test_schema_keys_are_unique() {
        let entries = describe_schema(&JsfProperties::default(), "jsf").unwrap();
        let keys: HashSet<_> = entries.iter().map(|e| e.key).collect();
        assert_eq!(keys.len(), entries.len());
        assert_eq!(entries.len(), 19);
    }

    #[test]
    fn test_enum_symbols_match_serde_names() {
        let submit = serde_json::to_value(SubmitMode::Partial).unwrap();
        assert_eq!(submit, serde_json::json!(SubmitMode::Partial.symbol()));

        let stage = serde_json::to_value(ProjectStage::SystemTest).unwrap();
        assert_eq!(stage, serde_json::json!(ProjectStage::SystemTest.symbol()));

        let uploader: UploaderMode = serde_json::from_str("\"commons\"").unwrap();
        assert_eq!(uploader, UploaderMode::Commons);
    }

    #[test]
    fn test_enum_input_ignores_case() {
        let dir: Direction = serde_json::from_str("\"RTL\"").unwrap();
        assert_eq!(dir, Direction::Rtl);

        let stage: ProjectStage = serde_json::from_str("\"production\"").unwrap();
        assert_eq!(stage, ProjectStage::Production);

        let err = serde_json::from_str::<SubmitMode>("\"sideways\"").unwrap_err();
        assert!(err.to_string().contains("expected one of: full, partial"));
    }
}
