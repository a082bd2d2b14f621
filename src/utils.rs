/// Random per-session client identity, for deployments where several sessions
/// may be open against the same backend at once.
pub fn random_client_id() -> String {
    use rand::Rng;
    let mut rng = rand::thread_rng();
    let alphabet: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let tag: String = (0..10)
        .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
        .collect();
    format!("client-{tag}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_client_id_shape() {
        let id = random_client_id();
        assert!(id.starts_with("client-"));
        assert_eq!(id.len(), "client-".len() + 10);
    }

    #[test]
    fn random_client_ids_differ() {
        assert_ne!(random_client_id(), random_client_id());
    }
}
