//! Review assignment domain models.
//!
//! Input entities (submissions, reviewers, track limits) and the solution
//! types produced by a run.
//!
//! # Domain Mappings
//!
//! | review-assign | Peer review | Conference | Grant panel |
//! |---------------|-------------|------------|-------------|
//! | Submission | Beamtime proposal | Paper | Application |
//! | Reviewer | External referee | PC member | Panelist |
//! | Track | Review track | Conference track | Funding line |
//! | Committee | Review panel | Senior PC | Chairs |

mod assignment;
mod reviewer;
mod submission;
mod track;

pub use assignment::{Assignment, PageOutcome, PageReport, Pass, RunResult};
pub use reviewer::{Reviewer, ReviewerRecord};
pub use submission::{PersonName, Submission, SubmissionRecord};
pub use track::{committee_cap, max_assignment, TrackConfig};
