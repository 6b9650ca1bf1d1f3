//! Integration tests: bet sources → odds engine → HTTP surface.

mod mock_source;
mod pipeline;
