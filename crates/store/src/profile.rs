use serde::{Deserialize, Serialize};

/// A registered profile as held by the persistence layer.
///
/// Values are stored as entered at registration. In particular `gender` is a
/// free string and may carry stray casing or whitespace; consumers decide how
/// strictly to compare it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: String,
    pub serial_no: String,
    pub name: String,
    pub gender: String,
    /// `YYYY-MM-DD`.
    pub birth_date: String,
    #[serde(default)]
    pub contact_no: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nakshatra_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gothram: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rasi: Option<String>,
}

impl Profile {
    /// Minimal profile; astrological attributes start empty.
    pub fn new(
        id: impl Into<String>,
        serial_no: impl Into<String>,
        name: impl Into<String>,
        gender: impl Into<String>,
        birth_date: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            serial_no: serial_no.into(),
            name: name.into(),
            gender: gender.into(),
            birth_date: birth_date.into(),
            contact_no: String::new(),
            nakshatra_id: None,
            gothram: None,
            rasi: None,
        }
    }

    pub fn with_contact(mut self, contact_no: impl Into<String>) -> Self {
        self.contact_no = contact_no.into();
        self
    }

    pub fn with_nakshatra(mut self, nakshatra_id: impl Into<String>) -> Self {
        self.nakshatra_id = Some(nakshatra_id.into());
        self
    }

    pub fn with_gothram(mut self, gothram: impl Into<String>) -> Self {
        self.gothram = Some(gothram.into());
        self
    }

    pub fn with_rasi(mut self, rasi: impl Into<String>) -> Self {
        self.rasi = Some(rasi.into());
        self
    }
}
