use crate::model::{Collection, POTENTIAL_MAX, Record};

pub fn record_details(r: &Record) -> String {
    format!(
        "Name: {}\n\
         Student ID: {}\n\
         Coursework marks: {:?} (Total: {})\n\
         Exam mark: {}\n\
         Overall total: {}/{}\n\
         Percentage: {:.2}%\n\
         Grade: {}\n",
        r.name,
        r.id,
        r.coursework,
        r.coursework_total(),
        r.exam,
        r.total(),
        POTENTIAL_MAX,
        r.percentage(),
        r.grade(),
    )
}

pub fn record_table(c: &Collection) -> String {
    let Some(average) = c.class_average() else {
        return "No student records found.\n".to_owned();
    };
    let header = format!(
        "{:<6}{:<20}{:>6}{:>7}{:>8}{:>8}{:>7}\n{}\n",
        "ID",
        "Name",
        "CW",
        "Exam",
        "Total",
        "%",
        "Grade",
        "━".repeat(60)
    );
    let rows = c
        .iter()
        .map(|r| {
            format!(
                "{:<6}{:<20}{:>6}{:>7}{:>8}{:7.1}%{:>8}\n",
                r.id,
                r.name,
                r.coursework_total(),
                r.exam,
                r.total(),
                r.percentage(),
                r.grade()
            )
        })
        .collect::<String>();
    format!(
        "{header}{rows}\nTotal Students: {}\nClass Average: {:.2}%\n",
        c.len(),
        average
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_details() {
        let r = Record::new("S2", "Bob", [10, 10, 10], 20);
        assert_eq!(
            record_details(&r),
            "Name: Bob\n\
             Student ID: S2\n\
             Coursework marks: [10, 10, 10] (Total: 30)\n\
             Exam mark: 20\n\
             Overall total: 50/160\n\
             Percentage: 31.25%\n\
             Grade: F\n"
        );
    }

    #[test]
    fn test_record_table() {
        let c = Collection::new(vec![
            Record::new("S1", "Ada", [40, 40, 40], 80),
            Record::new("S2", "Bob", [10, 10, 10], 25),
        ]);
        let table = record_table(&c);
        let lines = table.lines().collect::<Vec<_>>();
        assert_eq!(
            lines[0],
            "ID    Name                    CW   Exam   Total       %  Grade"
        );
        assert_eq!(
            lines[2],
            "S1    Ada                    120     80     200  125.0%       A"
        );
        assert_eq!(
            lines[3],
            "S2    Bob                     30     25      55   34.4%       F"
        );
        assert!(table.ends_with("Total Students: 2\nClass Average: 79.69%\n"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(
            record_table(&Collection::default()),
            "No student records found.\n"
        );
    }
}
