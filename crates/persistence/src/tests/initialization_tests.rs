// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Backend initialization tests.

use crate::{Persistence, PersistenceError};

#[test]
fn test_persistence_initialization() {
    let result: Result<Persistence, PersistenceError> = Persistence::new_in_memory();
    assert!(result.is_ok());
}

#[test]
fn test_foreign_key_enforcement_is_enabled() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert!(persistence.verify_foreign_key_enforcement().is_ok());
}

#[test]
fn test_fresh_database_is_empty() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    assert_eq!(persistence.count_sites().unwrap(), 0);
    assert_eq!(persistence.count_tickets().unwrap(), 0);
    assert_eq!(persistence.count_operators().unwrap(), 0);
}

#[test]
fn test_multiple_in_memory_instances_are_isolated() {
    let mut db1 = Persistence::new_in_memory().unwrap();
    let mut db2 = Persistence::new_in_memory().unwrap();

    db1.create_operator("op1", "op1@example.gov", "password")
        .unwrap();

    assert_eq!(db1.count_operators().unwrap(), 1, "db1 should have 1 operator");
    assert_eq!(
        db2.count_operators().unwrap(),
        0,
        "db2 should have 0 operators (isolated)"
    );
}
