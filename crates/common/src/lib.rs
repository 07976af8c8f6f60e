pub mod types;
pub mod utils;

#[cfg(test)]
mod tests {
    use crate::types::Health;

    #[test]
    fn health_type_ok() {
        let h = Health { status: "ok" };
        assert_eq!(h.status, "ok");
    }
}
