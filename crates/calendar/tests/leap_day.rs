use aeolus_calendar::{
    HOURS_PER_LEAP_YEAR, HOURS_PER_YEAR, hourly_index, leap_day_mask, remove_leap_day,
};

#[test]
fn leap_year_index_has_one_leap_day() {
    let times = hourly_index(2012).unwrap();
    assert_eq!(times.len(), HOURS_PER_LEAP_YEAR);
    let flagged = leap_day_mask(&times).iter().filter(|&&m| m).count();
    assert_eq!(flagged, 24);
}

#[test]
fn common_year_passes_through() {
    let times = hourly_index(2015).unwrap();
    let values: Vec<f64> = (0..times.len()).map(|i| i as f64).collect();
    let out = remove_leap_day(&values, &times).unwrap();
    assert_eq!(out.len(), HOURS_PER_YEAR);
    assert_eq!(out, values);
}

#[test]
fn multi_year_series() {
    let mut times = hourly_index(2015).unwrap();
    times.extend(hourly_index(2016).unwrap());
    let values = vec![1.0; times.len()];
    let out = remove_leap_day(&values, &times).unwrap();
    assert_eq!(out.len(), 2 * HOURS_PER_YEAR);
}
