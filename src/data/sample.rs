//! Built-in sample assignments used when no data files are configured.

use crate::grid::Record;

fn assignment(
    invoice: &str,
    order: &str,
    postcode: &str,
    status: &str,
    description: &str,
    driver: &str,
    pod_url: &str,
) -> Record {
    Record::new()
        .with("invoice", invoice)
        .with("order", order)
        .with("postcode", postcode)
        .with("status", status)
        .with("description", description)
        .with("driver", driver)
        .with("podUrl", pod_url)
}

pub fn completed() -> Vec<Record> {
    (0..7)
        .flat_map(|_| {
            [
                assignment(
                    "1261756",
                    "20116018",
                    "2170",
                    "Complete",
                    "Refrig",
                    "Adam",
                    "/pods/1261756.pdf",
                ),
                assignment(
                    "1261756",
                    "20116020",
                    "2167",
                    "Complete",
                    "AC",
                    "Mark",
                    "/pods/1261756-2.pdf",
                ),
            ]
        })
        .collect()
}

pub fn ongoing() -> Vec<Record> {
    vec![
        assignment(
            "1261756",
            "20116018",
            "2170",
            "In Progress",
            "Refrig",
            "Adam",
            "/pods/1261756.pdf",
        ),
        assignment(
            "1261756",
            "20116020",
            "2167",
            "Complete",
            "AC",
            "Mark",
            "/pods/1261756-2.pdf",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_sizes() {
        assert_eq!(completed().len(), 14);
        assert_eq!(ongoing().len(), 2);
        assert!(completed().iter().all(|r| r.text("status") == "Complete"));
    }
}
