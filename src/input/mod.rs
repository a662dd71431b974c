use std::collections::HashSet;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub id: String,
    pub text: String,
    pub accession: Option<String>,
    pub patient: Option<String>,
    pub tumor: Option<String>,
}

impl Report {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            accession: None,
            patient: None,
            tumor: None,
        }
    }

    /// Case key `<patient>_<tumor>`, or the bare patient id when the tumor
    /// column is absent.
    pub fn case_id(&self) -> Option<String> {
        let patient = self.patient.as_deref()?;
        match self.tumor.as_deref() {
            Some(tumor) => Some(format!("{}_{}", patient, tumor)),
            None => Some(patient.to_string()),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Subset {
    pub records: Option<HashSet<String>>,
    pub patients: Option<HashSet<String>>,
    pub skip_cases: Option<HashSet<String>>,
}

impl Subset {
    pub fn is_empty(&self) -> bool {
        self.records.is_none() && self.patients.is_none() && self.skip_cases.is_none()
    }

    pub fn keeps(&self, report: &Report) -> bool {
        if let Some(records) = &self.records {
            if !records.contains(&report.id) {
                return false;
            }
        }
        if let Some(patients) = &self.patients {
            match report.patient.as_deref() {
                Some(p) if patients.contains(p) => {}
                _ => return false,
            }
        }
        if let Some(skip) = &self.skip_cases {
            if let Some(case) = report.case_id() {
                if skip.contains(&case) {
                    return false;
                }
            }
        }
        true
    }
}
