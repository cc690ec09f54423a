// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProcedureError {
    #[error("Procedure {name} takes exactly {expected} parameters ({got} given)")]
    Arity {
        name: String,
        expected: usize,
        got: usize,
    },

    #[error("Procedure {0} cannot be specialised")]
    NotSpecializable(String),
}
