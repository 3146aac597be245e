//! Key generation command.
//!
//! `supakeys` - Generate a signing secret, both role keys and a secret key base.

use anyhow::Context;
use rand::TryRngCore;
use rand::rngs::OsRng;
use std::io::Write;
use supakeys_jwt::{ANON_ROLE, Clock, SERVICE_ROLE, Secret, TokenSigner, TokenVerifier};

/// Everything a fresh deployment needs, generated in one pass.
#[derive(Debug)]
pub struct GeneratedKeys {
    /// Signing secret for both role keys.
    pub jwt_secret: Secret,
    /// Token for the `anon` role.
    pub anon_key: String,
    /// Token for the `service_role` role.
    pub service_role_key: String,
    /// Independent secret, not used for signing.
    pub secret_key_base: Secret,
}

impl GeneratedKeys {
    /// Draw both secrets from `rng` and sign both role keys.
    pub fn generate<R: TryRngCore, C: Clock>(
        rng: &mut R,
        signer: &TokenSigner<C>,
    ) -> anyhow::Result<Self> {
        let jwt_secret = Secret::generate_with(rng).context("Failed to generate JWT_SECRET")?;
        let secret_key_base =
            Secret::generate_with(rng).context("Failed to generate SECRET_KEY_BASE")?;

        let anon_key = signer
            .sign(ANON_ROLE, jwt_secret.as_str())
            .context("Failed to sign ANON_KEY")?;
        let service_role_key = signer
            .sign(SERVICE_ROLE, jwt_secret.as_str())
            .context("Failed to sign SERVICE_ROLE_KEY")?;

        Ok(Self {
            jwt_secret,
            anon_key,
            service_role_key,
            secret_key_base,
        })
    }

    /// Check that both role keys verify against the signing secret.
    pub fn verify(&self) -> anyhow::Result<()> {
        let verifier = TokenVerifier::new(self.jwt_secret.as_str());
        for (name, token, role) in [
            ("ANON_KEY", &self.anon_key, ANON_ROLE),
            ("SERVICE_ROLE_KEY", &self.service_role_key, SERVICE_ROLE),
        ] {
            let verified = verifier
                .verify(token)
                .with_context(|| format!("{name} does not verify against JWT_SECRET"))?;
            anyhow::ensure!(
                verified.role() == role,
                "{name} carries role {:?}, expected {role:?}",
                verified.role()
            );
        }
        Ok(())
    }

    /// Render as `KEY=value` lines in .env order.
    pub fn to_env_lines(&self) -> String {
        format!(
            "JWT_SECRET={}\nANON_KEY={}\nSERVICE_ROLE_KEY={}\nSECRET_KEY_BASE={}\n",
            self.jwt_secret.as_str(),
            self.anon_key,
            self.service_role_key,
            self.secret_key_base.as_str(),
        )
    }
}

/// Generate fresh keys and print them to stdout.
pub fn run() -> anyhow::Result<()> {
    let keys = GeneratedKeys::generate(&mut OsRng, &TokenSigner::new())?;
    keys.verify()?;
    tracing::debug!("Generated and verified deployment keys");

    // Written in one go so a failure above leaves stdout empty.
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(keys.to_env_lines().as_bytes())
        .and_then(|()| stdout.flush())
        .context("Failed to write keys to stdout")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io;
    use supakeys_jwt::{FixedClock, JwtError};

    const IAT: i64 = 1_700_000_000;

    struct DrainedRng;

    impl TryRngCore for DrainedRng {
        type Error = io::Error;

        fn try_next_u32(&mut self) -> Result<u32, Self::Error> {
            Err(io::Error::other("no entropy"))
        }

        fn try_next_u64(&mut self) -> Result<u64, Self::Error> {
            Err(io::Error::other("no entropy"))
        }

        fn try_fill_bytes(&mut self, _dst: &mut [u8]) -> Result<(), Self::Error> {
            Err(io::Error::other("no entropy"))
        }
    }

    fn generate_seeded(seed: u64) -> GeneratedKeys {
        let signer = TokenSigner::with_clock(FixedClock(IAT));
        GeneratedKeys::generate(&mut StdRng::seed_from_u64(seed), &signer).unwrap()
    }

    #[test]
    fn test_env_lines_order() {
        let keys = generate_seeded(1);
        let output = keys.to_env_lines();
        let names: Vec<&str> = output
            .lines()
            .map(|line| line.split_once('=').unwrap().0)
            .collect();

        assert_eq!(
            names,
            ["JWT_SECRET", "ANON_KEY", "SERVICE_ROLE_KEY", "SECRET_KEY_BASE"]
        );
        assert!(output.ends_with('\n'));
    }

    #[test]
    fn test_secrets_are_independent() {
        let keys = generate_seeded(1);
        assert_ne!(keys.jwt_secret, keys.secret_key_base);
        assert_ne!(keys.jwt_secret.as_bytes(), keys.secret_key_base.as_bytes());
        assert_eq!(keys.jwt_secret.as_str().len(), 44);
    }

    #[test]
    fn test_role_keys_signed_with_jwt_secret() {
        let keys = generate_seeded(2);
        keys.verify().unwrap();

        let verifier = TokenVerifier::new(keys.jwt_secret.as_str());
        assert_eq!(verifier.verify(&keys.anon_key).unwrap().role(), ANON_ROLE);
        assert_eq!(
            verifier.verify(&keys.service_role_key).unwrap().role(),
            SERVICE_ROLE
        );
        assert!(
            TokenVerifier::new(keys.secret_key_base.as_str())
                .verify(&keys.anon_key)
                .is_err()
        );
    }

    #[test]
    fn test_same_seed_and_time_reproduce_output() {
        assert_eq!(
            generate_seeded(3).to_env_lines(),
            generate_seeded(3).to_env_lines()
        );
        assert_ne!(
            generate_seeded(3).to_env_lines(),
            generate_seeded(4).to_env_lines()
        );
    }

    #[test]
    fn test_verify_catches_swapped_keys() {
        let mut keys = generate_seeded(5);
        std::mem::swap(&mut keys.anon_key, &mut keys.service_role_key);
        let err = keys.verify().unwrap_err();
        assert!(err.to_string().contains("ANON_KEY"));
    }

    #[test]
    fn test_entropy_failure_aborts() {
        let signer = TokenSigner::with_clock(FixedClock(IAT));
        let err = GeneratedKeys::generate(&mut DrainedRng, &signer).unwrap_err();

        assert!(err.to_string().contains("JWT_SECRET"));
        assert!(matches!(
            err.downcast_ref::<JwtError>(),
            Some(JwtError::EntropyUnavailable(_))
        ));
    }
}
