/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2025 ByteDance and/or its affiliates.
 */

use std::fmt;

/// The collector side limits identifier length to 128 bytes including the
/// terminator, so 127 usable bytes.
const MAX_INSTANCE_LEN: usize = 127;

/// A metric instance name, either the short name of a status source or a
/// client common name. Over-long names are truncated at a char boundary,
/// never rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub(crate) struct Instance(String);

impl Instance {
    pub(crate) fn new(s: &str) -> Self {
        if s.len() <= MAX_INSTANCE_LEN {
            return Instance(s.to_string());
        }
        let mut end = MAX_INSTANCE_LEN;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        Instance(s[..end].to_string())
    }

    #[inline]
    pub(crate) fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.0.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_kept() {
        let instance = Instance::new("vpn0.status");
        assert_eq!(instance.as_str(), "vpn0.status");
    }

    #[test]
    fn long_truncated() {
        let name = "x".repeat(300);
        let instance = Instance::new(&name);
        assert_eq!(instance.as_str().len(), MAX_INSTANCE_LEN);
    }

    #[test]
    fn truncation_respects_char_boundary() {
        // 'é' is 2 bytes, 64 of them span the 127 byte limit at 126/128
        let name = "é".repeat(64);
        let instance = Instance::new(&name);
        assert_eq!(instance.as_str().len(), 126);
        assert_eq!(instance.as_str().chars().count(), 63);
    }
}
