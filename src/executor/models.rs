/// A response obtained from the API, whatever its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallResult {
    pub status: u16,
    pub body: String,
}

impl CallResult {
    /// Anything above 200 counts, including 201 and redirects.
    pub fn is_error(&self) -> bool {
        self.status > 200
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TlsMode {
    #[default]
    Verify,
    /// Accept any certificate and host name.
    Insecure,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(status: u16) -> CallResult {
        CallResult {
            status,
            body: String::new(),
        }
    }

    #[test]
    fn only_statuses_above_200_are_errors() {
        assert!(!result(200).is_error());
        assert!(!result(100).is_error());
        for status in [201, 204, 301, 404, 500] {
            assert!(result(status).is_error(), "{status} should count as an error");
        }
    }

    #[test]
    fn tls_verification_is_on_by_default() {
        assert_eq!(TlsMode::default(), TlsMode::Verify);
    }
}
