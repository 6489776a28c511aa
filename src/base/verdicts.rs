//! Verdict texts delivered to the chat for each review status.

/// Verdict for a homework the reviewer accepted.
pub const APPROVED: &str = "Работа проверена: ревьюеру всё понравилось. Ура!";

/// Verdict for a homework a reviewer picked up.
pub const REVIEWING: &str = "Работа взята на проверку ревьюером.";

/// Verdict for a homework returned with remarks.
pub const REJECTED: &str = "Работа проверена: у ревьюера есть замечания.";
