//! Request execution: the transport seam and the request pipeline helpers.

pub mod http;
