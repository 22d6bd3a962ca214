mod project;
mod story;

pub use project::ProjectDetails;
pub use story::{Story, StoryFields, StoryState, StoryType};
