use serde::{Deserialize, Serialize};

/// One role on the about page's experience tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Experience {
    pub company: String,
    pub role: String,
    pub period: String,
    /// Employment type, e.g. "Full-time".
    #[serde(rename = "type")]
    pub kind: String,
    pub location: Option<String>,
    pub logo: Option<String>,
}

impl Experience {
    /// "Company · Full-time"
    pub fn employer_line(&self) -> String {
        format!("{} · {}", self.company, self.kind)
    }
}

/// One entry on the about page's education tab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts", derive(ts_rs::TS), ts(export))]
pub struct Education {
    pub school: String,
    pub degree: String,
    pub field: String,
    pub period: String,
    pub location: Option<String>,
    pub logo: Option<String>,
    pub gpa: Option<String>,
}

impl Education {
    /// "Degree, Field"
    pub fn qualification(&self) -> String {
        format!("{}, {}", self.degree, self.field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_experience_type_field_name() {
        let exp: Experience = serde_json::from_str(
            r#"{"company": "Acme", "role": "Engineer", "period": "2024 - Present",
                "type": "Contract", "location": null, "logo": null}"#,
        )
        .unwrap();
        assert_eq!(exp.kind, "Contract");
        assert_eq!(exp.employer_line(), "Acme · Contract");
    }

    #[test]
    fn test_education_qualification() {
        let edu = Education {
            school: "State University".to_string(),
            degree: "BSc".to_string(),
            field: "Physics".to_string(),
            period: "2018 - 2022".to_string(),
            location: None,
            logo: None,
            gpa: None,
        };
        assert_eq!(edu.qualification(), "BSc, Physics");
    }
}
