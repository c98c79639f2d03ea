// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors raised while reading geometry.

use crate::types::ElementId;

/// A geometry read that cannot produce meaningful rectangles.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// The document root has no containing element; only ordinary elements can be measured.
    #[error("cannot snapshot the document root; only ordinary elements have geometry")]
    RootElement,
    /// The element handle no longer refers to a live element.
    #[error("element {0:?} is not alive")]
    StaleElement(ElementId),
    /// The element was detached from the document and has no container.
    #[error("element {0:?} is detached from the document")]
    Detached(ElementId),
}
