use crate::core::instance_header::InstanceHeader;
use std::sync::Arc;

/// Class-only schema with labels `A` and `B`.
pub fn header_binary() -> Arc<InstanceHeader> {
    InstanceHeader::nominal("bin", &[("class", &["A", "B"])], 0)
        .unwrap_or_else(|e| panic!("bin header: {e}"))
}

/// `A` with three values, `B` with two, binary class `C` last.
pub fn header_abc() -> Arc<InstanceHeader> {
    InstanceHeader::nominal(
        "abc",
        &[
            ("A", &["a0", "a1", "a2"]),
            ("B", &["b0", "b1"]),
            ("C", &["c0", "c1"]),
        ],
        2,
    )
    .unwrap_or_else(|e| panic!("abc header: {e}"))
}
