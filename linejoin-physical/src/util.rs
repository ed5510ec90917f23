//! This module collects miscellaneous functionality.

pub(crate) mod test_util;
