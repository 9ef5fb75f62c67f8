//! Shared test helpers

#![allow(dead_code, unused_imports)]

pub mod fixtures;
pub mod mock_build;
pub mod mock_gateway;
pub mod mock_vcs;
pub mod scripted_prompt;

pub use fixtures::CourseFixture;
pub use mock_build::MockBuild;
pub use mock_gateway::MockGateway;
pub use mock_vcs::MockVcs;
pub use scripted_prompt::ScriptedPrompt;
