// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for the persistence layer.
//!
//! ## Module Organization
//!
//! - `redemption`: Voucher redemption (first and repeat)
//! - `fixtures`: Reference data import (federal sites, tickets)
//! - `operators`: Operator and session mutations
//!
//! Inserted row IDs are read back through the `PersistenceBackend` trait.

pub mod fixtures;
pub mod operators;
pub mod redemption;
