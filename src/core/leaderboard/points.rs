// Contribution points table.
//
// Task labels are matched case-insensitively against this fixed list.

/// (label, points) pairs. Labels are stored lowercase.
pub const POINTS_TABLE: [(&str, u32); 20] = [
    ("pull request", 20),
    ("blog medium", 20),
    ("blog", 15),
    ("sm posting", 7),
    ("weekly work", 5),
    ("idea", 3),
    ("brochure", 10),
    ("news", 5),
    ("demos", 20),
    ("oc volunteer", 30),
    ("oc assigned", 20),
    ("oc no work", 10),
    ("oc manager", 50),
    ("wtf", 50),
    ("discord", 10),
    ("marketing", 20),
    ("mini project", 100),
    ("complete project", 200),
    ("promotion medium", 25),
    ("promotion large", 50),
];

/// Points awarded for `task`, or `None` when the label isn't in the table.
pub fn points_for(task: &str) -> Option<u32> {
    let label = task.to_lowercase();
    POINTS_TABLE
        .iter()
        .find(|(known, _)| *known == label)
        .map(|(_, points)| *points)
}

/// Every known label, in table order. Used for the "unknown task" reply.
pub fn known_tasks() -> impl Iterator<Item = &'static str> {
    POINTS_TABLE.iter().map(|(label, _)| *label)
}
