use rand::RngCore;

const TOKEN_BYTES: usize = 128;

/// Generates an opaque bearer token: 128 bytes from the OS RNG, hex-encoded.
///
/// Tokens are not checked against existing ones here; the `users.access_token`
/// unique index rejects the astronomically unlikely collision at insert time.
pub fn issue_access_token() -> String {
    let mut bytes = [0u8; TOKEN_BYTES];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}
