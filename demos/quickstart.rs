use timemap::{BoundarySequence, DateRecord, TimeMap, TimeStepRecord};

fn main() -> timemap::Result<()> {
    let mut map = TimeMap::from_start_record(Some(&DateRecord::new(1, "JAN", 2020)))?;
    map.add_from_tstep_records(&vec![TimeStepRecord::days(31.0); 12])?;
    map.add_from_dates_records(&[DateRecord::new(1, "JLY", 2021).with_time("12:00:00")])?;

    let quarterly = BoundarySequence::months().every(3);
    for (index, time) in map.iter().enumerate() {
        let report = map.is_boundary_step(index, &quarterly)?;
        println!("{index:>3}  {time}  {}", if report { "report" } else { "" });
    }
    println!("total: {}", map.total_time());
    Ok(())
}
