//! Record validation
//!
//! Every record passes through [`Validate`] before the store admits it.
//! Identifier and enum fields are valid by construction (they are typed);
//! what remains are the required string fields each kind carries.

use super::resource::{Device, Flow, Node, Receiver, Sender, Source};

/// A field that failed validation, and why
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ValidationFault {
    pub field: &'static str,
    pub reason: &'static str,
}

/// Admission check applied by the store on every put
pub trait Validate {
    /// Check the record's required fields
    fn validate(&self) -> Result<(), ValidationFault>;

    /// Convenience verdict
    fn valid(&self) -> bool {
        self.validate().is_ok()
    }
}

fn require_non_empty(field: &'static str, value: &str) -> Result<(), ValidationFault> {
    if value.is_empty() {
        Err(ValidationFault {
            field,
            reason: "must be a non-empty string",
        })
    } else {
        Ok(())
    }
}

impl Validate for Node {
    fn validate(&self) -> Result<(), ValidationFault> {
        require_non_empty("label", &self.label)?;
        require_non_empty("href", &self.href)?;
        require_non_empty("hostname", &self.hostname)
    }
}

impl Validate for Device {
    fn validate(&self) -> Result<(), ValidationFault> {
        require_non_empty("label", &self.label)
    }
}

impl Validate for Source {
    fn validate(&self) -> Result<(), ValidationFault> {
        require_non_empty("label", &self.label)
    }
}

impl Validate for Flow {
    fn validate(&self) -> Result<(), ValidationFault> {
        require_non_empty("label", &self.label)
    }
}

impl Validate for Sender {
    fn validate(&self) -> Result<(), ValidationFault> {
        require_non_empty("label", &self.label)?;
        require_non_empty("manifest_href", &self.manifest_href)
    }
}

impl Validate for Receiver {
    fn validate(&self) -> Result<(), ValidationFault> {
        require_non_empty("label", &self.label)
    }
}

#[cfg(test)]
mod tests {
    use uuid::Uuid;

    use super::super::resource::{Format, Transport};
    use super::*;

    #[test]
    fn test_valid_records_pass() {
        assert!(Node::new("Main rack", "http://cam0.local:3000", "cam0").valid());
        assert!(Device::new("Capture card", Uuid::new_v4()).valid());
        assert!(Sender::new(
            "Program out",
            Uuid::new_v4(),
            Transport::RtpMulticast,
            Uuid::new_v4(),
            "http://cam0.local/program.sdp",
        )
        .valid());
    }

    #[test]
    fn test_empty_label_is_rejected() {
        let fault = Source::new("", Format::Audio, Uuid::new_v4())
            .validate()
            .unwrap_err();
        assert_eq!(fault.field, "label");
    }

    #[test]
    fn test_node_requires_href_and_hostname() {
        let fault = Node::new("Main rack", "", "cam0").validate().unwrap_err();
        assert_eq!(fault.field, "href");

        let fault = Node::new("Main rack", "http://cam0.local:3000", "")
            .validate()
            .unwrap_err();
        assert_eq!(fault.field, "hostname");
    }

    #[test]
    fn test_sender_requires_manifest_href() {
        let fault = Sender::new(
            "Program out",
            Uuid::new_v4(),
            Transport::Rtp,
            Uuid::new_v4(),
            "",
        )
        .validate()
        .unwrap_err();
        assert_eq!(fault.field, "manifest_href");
    }
}
