use uuid::Uuid;

/// Genera un nuovo id utente unico (UUIDv4) come stringa.
pub fn new_user_id() -> String {
    Uuid::new_v4().to_string()
}
