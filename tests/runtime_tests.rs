//! Drives the runtime support through code shaped like `attrgen generate`
//! output for a small design:
//!
//! ```yaml
//! types:
//!   - name: Winery
//!     required: [name]
//!     attributes:
//!       - { name: name, type: string, min_length: 1 }
//!       - { name: website, type: string, format: uri }
//!       - { name: founded, type: integer, minimum: 1000, default: 1900 }
//!       - name: grapes
//!         type: { array: { type: string, enum: [merlot, syrah] } }
//! ```

use attrgen::runtime::{ValidationError, ValidationErrors};

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct WineryPrivate {
    #[serde(rename = "name", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "website", default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(rename = "founded", default, skip_serializing_if = "Option::is_none")]
    pub founded: Option<i64>,
    #[serde(rename = "grapes", default, skip_serializing_if = "Option::is_none")]
    pub grapes: Option<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Winery {
    #[serde(rename = "name")]
    pub name: String,
    #[serde(rename = "website", default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(rename = "founded")]
    pub founded: i64,
    #[serde(rename = "grapes", default, skip_serializing_if = "Option::is_none")]
    pub grapes: Option<Vec<String>>,
}

impl WineryPrivate {
    pub fn validate(&self) -> Result<(), attrgen::runtime::ValidationErrors> {
        let mut err = attrgen::runtime::ValidationErrors::new();
        {
            let v0 = self;
            if v0.name.is_none() {
                err.push(attrgen::runtime::ValidationError::missing_attribute("Winery", "name"));
            }
            if let Some(v1) = &v0.name {
                if v1.chars().count() < 1 {
                    err.push(attrgen::runtime::ValidationError::invalid_length("Winery.name", v1, v1.chars().count(), 1, true));
                }
            }
            if let Some(v1) = &v0.website {
                if let Err(reason) = attrgen::runtime::validate_format(attrgen::runtime::Format::Uri, v1) {
                    err.push(attrgen::runtime::ValidationError::invalid_format("Winery.website", v1, attrgen::runtime::Format::Uri, reason));
                }
            }
            if let Some(v1) = &v0.founded {
                if *v1 < 1000 {
                    err.push(attrgen::runtime::ValidationError::invalid_range("Winery.founded", v1, 1000.0, true));
                }
            }
            if let Some(v1) = &v0.grapes {
                for e1 in v1.iter() {
                    {
                        let v2 = &(*e1);
                        if !(*v2 == "merlot" || *v2 == "syrah") {
                            err.push(attrgen::runtime::ValidationError::invalid_enum_value("Winery.grapes[*]", v2, &["merlot", "syrah"]));
                        }
                    }
                }
            }
        }
        err.into_result()
    }

    pub fn finalize(&mut self) {
        if self.founded.is_none() {
            self.founded = Some(1900);
        }
    }

    pub fn publicize(&self) -> Winery {
        let mut target = Winery::default();
        if let Some(v0) = &self.name {
            target.name = v0.clone();
        }
        if let Some(v0) = &self.website {
            target.website = Some(v0.clone());
        }
        if let Some(v0) = &self.founded {
            target.founded = v0.clone();
        }
        if let Some(v0) = &self.grapes {
            target.grapes = Some(v0.clone());
        }
        target
    }
}

fn decode(json: &str) -> WineryPrivate {
    serde_json::from_str(json).unwrap()
}

#[test]
fn test_valid_payload_round_trip() {
    let mut private = decode(r#"{"name": "Chateau", "website": "https://example.com", "grapes": ["merlot"]}"#);
    assert!(private.validate().is_ok());
    private.finalize();
    let public = private.publicize();
    assert_eq!(public.name, "Chateau");
    assert_eq!(public.founded, 1900);
    assert_eq!(public.grapes, Some(vec!["merlot".to_string()]));

    let encoded = serde_json::to_value(&public).unwrap();
    assert_eq!(encoded["founded"], 1900);
    assert!(encoded.get("website").is_some());
}

#[test]
fn test_every_violation_is_reported() {
    let private = decode(r#"{"website": "not a uri", "founded": 12, "grapes": ["merlot", "pinot"]}"#);
    let errors = private.validate().unwrap_err();
    let paths: Vec<&str> = errors.iter().map(ValidationError::path).collect();
    assert_eq!(
        paths,
        vec!["Winery", "Winery.website", "Winery.founded", "Winery.grapes[*]"]
    );
    assert_eq!(errors.len(), 4);

    let message = errors.to_string();
    assert!(message.contains("missing required attribute \"name\""), "{message}");
    assert!(message.contains("must be greater than or equal to 1000"), "{message}");
    assert!(message.contains("\"pinot\""), "{message}");
}

#[test]
fn test_nested_errors_merge_into_parent() {
    let mut parent = ValidationErrors::new();
    parent.push(ValidationError::missing_attribute("Bottle", "name"));
    if let Err(e) = decode(r#"{"founded": 12}"#).validate() {
        parent.merge(e);
    }
    assert_eq!(parent.len(), 3);
    assert!(parent.into_result().is_err());
}

#[test]
fn test_finalize_keeps_explicit_values() {
    let mut private = decode(r#"{"name": "Chateau", "founded": 1855}"#);
    private.finalize();
    assert_eq!(private.founded, Some(1855));
}
