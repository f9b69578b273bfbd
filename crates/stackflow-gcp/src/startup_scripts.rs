//! Boot scripts passed to instances through `metadataStartupScript`
//!
//! The scripts run on the instance itself; nothing here parses them.

/// Serves a static "Hello, World!" page on port 80
pub const HELLO_WORLD: &str = r#"#!/usr/bin/env bash
echo "Hello, World!" > index.html
nohup python -m SimpleHTTPServer 80 &"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hello_world_script() {
        assert!(HELLO_WORLD.starts_with("#!/usr/bin/env bash\n"));
        assert!(HELLO_WORLD.contains("SimpleHTTPServer 80"));
        assert_eq!(HELLO_WORLD.lines().count(), 3);
    }
}
