//! TLS material for the release manager connection

use std::path::Path;

use openssl::x509::X509;

use crate::error::{WhatupError, WhatupResult};

/// Read a PEM bundle and return the DER encoding of every certificate in it
pub fn load_certificates(path: &Path) -> WhatupResult<Vec<Vec<u8>>> {
    let pem = std::fs::read(path).map_err(|e| {
        WhatupError::Connection(format!(
            "could not read CA certificate '{}': {}",
            path.display(),
            e
        ))
    })?;

    certificates_from_pem(&pem, &path.display().to_string())
}

/// Decode the certificates of a PEM document; `origin` names it in errors
pub fn certificates_from_pem(pem: &[u8], origin: &str) -> WhatupResult<Vec<Vec<u8>>> {
    let invalid = |reason: String| {
        WhatupError::Connection(format!("invalid CA certificate '{}': {}", origin, reason))
    };

    let stack = X509::stack_from_pem(pem).map_err(|e| invalid(e.to_string()))?;
    if stack.is_empty() {
        return Err(invalid("no certificates found".to_string()));
    }

    stack
        .iter()
        .map(|certificate| certificate.to_der().map_err(|e| invalid(e.to_string())))
        .collect()
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use openssl::asn1::Asn1Time;
    use openssl::hash::MessageDigest;
    use openssl::pkey::PKey;
    use openssl::rsa::Rsa;
    use openssl::x509::X509NameBuilder;

    /// Self-signed certificate for `common_name`
    pub(crate) fn self_signed(common_name: &str) -> X509 {
        let key = PKey::from_rsa(Rsa::generate(2048).unwrap()).unwrap();

        let mut name = X509NameBuilder::new().unwrap();
        name.append_entry_by_text("CN", common_name).unwrap();
        let name = name.build();

        let mut builder = X509::builder().unwrap();
        builder.set_version(2).unwrap();
        builder.set_subject_name(&name).unwrap();
        builder.set_issuer_name(&name).unwrap();
        builder.set_pubkey(&key).unwrap();
        builder
            .set_not_before(&Asn1Time::days_from_now(0).unwrap())
            .unwrap();
        builder
            .set_not_after(&Asn1Time::days_from_now(1).unwrap())
            .unwrap();
        builder.sign(&key, MessageDigest::sha256()).unwrap();
        builder.build()
    }

    #[test]
    fn test_bundle_with_two_certificates() {
        let first = self_signed("ca-one");
        let second = self_signed("ca-two");
        let mut pem = b"# bundle\n".to_vec();
        pem.extend(first.to_pem().unwrap());
        pem.extend(second.to_pem().unwrap());

        let certificates = certificates_from_pem(&pem, "bundle.pem").unwrap();
        assert_eq!(
            certificates,
            vec![first.to_der().unwrap(), second.to_der().unwrap()]
        );
    }

    #[test]
    fn test_document_without_certificates() {
        let err = certificates_from_pem(b"not a certificate\n", "ca.pem").unwrap_err();
        assert!(matches!(err, WhatupError::Connection(ref msg) if msg.contains("ca.pem")));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ca.pem");
        let certificate = self_signed("tiller-ca");
        std::fs::write(&path, certificate.to_pem().unwrap()).unwrap();

        assert_eq!(
            load_certificates(&path).unwrap(),
            vec![certificate.to_der().unwrap()]
        );
    }

    #[test]
    fn test_missing_file_is_connection_error() {
        let err = load_certificates(Path::new("/nonexistent/ca.pem")).unwrap_err();
        assert!(matches!(err, WhatupError::Connection(_)));
    }
}
