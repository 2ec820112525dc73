mod testcase;

#[cfg(test)]
mod issue;

pub use testcase::db_test_case;
