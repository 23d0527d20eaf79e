/// Contract for the external credential-hashing collaborator. The algorithm
/// is expected to be a slow, salted, one-way construction; the core only
/// depends on this capability, never on a concrete implementation.
pub trait PasswordHasher: Send + Sync {
    fn hash(&self, plaintext: &str) -> String;
    fn verify(&self, plaintext: &str, digest: &str) -> bool;
}
