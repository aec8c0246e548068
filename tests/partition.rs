use laff::{
    part_by_column_lr, part_by_column_rl, part_by_row_bt, part_by_row_tb, Advance, Direction,
    DirectionalPartition, Filter, LaffError, Partition, SixWayPartition, SyncPartition, View,
};

fn r_vec() -> View<f64> {
    View::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[1, 4]).unwrap()
}

fn c_vec() -> View<f64> {
    View::from_vec(vec![1.0, 2.0, 3.0, 4.0], &[4, 1]).unwrap()
}

fn array_2x3() -> View<f64> {
    View::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap()
}

fn expect(dims: &[usize], data: &[f64]) -> View<f64> {
    View::from_vec(data.to_vec(), dims).unwrap()
}

#[test]
fn test_vector_rows_top_to_bottom() {
    let [top, bottom] = part_by_row_tb(&c_vec(), 1, 0b11).unwrap().into_array().unwrap();
    assert!(top.identical(&expect(&[1, 1], &[1.0])));
    assert!(bottom.identical(&expect(&[3, 1], &[2.0, 3.0, 4.0])));

    let ret = part_by_row_tb(&c_vec(), 2, Filter::TAIL).unwrap();
    assert_eq!(ret.len(), 1);
    assert!(ret[0].identical(&expect(&[2, 1], &[3.0, 4.0])));

    let ret = part_by_row_tb(&c_vec(), 2, Filter::HEAD).unwrap();
    assert!(ret[0].identical(&expect(&[2, 1], &[1.0, 2.0])));

    let ret = part_by_row_tb(&c_vec(), 3, Filter::HEAD).unwrap();
    assert!(ret[0].identical(&expect(&[3, 1], &[1.0, 2.0, 3.0])));
}

#[test]
fn test_vector_rows_bottom_to_top() {
    let [top, bottom] = part_by_row_bt(&c_vec(), 1, 0b11).unwrap().into_array().unwrap();
    assert!(top.identical(&expect(&[3, 1], &[1.0, 2.0, 3.0])));
    assert!(bottom.identical(&expect(&[1, 1], &[4.0])));

    let ret = part_by_row_bt(&c_vec(), 2, Filter::TAIL).unwrap();
    assert!(ret[0].identical(&expect(&[2, 1], &[3.0, 4.0])));

    let ret = part_by_row_bt(&c_vec(), 2, Filter::HEAD).unwrap();
    assert!(ret[0].identical(&expect(&[2, 1], &[1.0, 2.0])));

    let ret = part_by_row_bt(&c_vec(), 3, Filter::HEAD).unwrap();
    assert!(ret[0].identical(&expect(&[1, 1], &[1.0])));
}

#[test]
fn test_vector_columns_left_to_right() {
    let [left, right] = part_by_column_lr(&r_vec(), 1, 0b11).unwrap().into_array().unwrap();
    assert!(left.identical(&expect(&[1, 1], &[1.0])));
    assert!(right.identical(&expect(&[1, 3], &[2.0, 3.0, 4.0])));

    let ret = part_by_column_lr(&r_vec(), 2, Filter::TAIL).unwrap();
    assert!(ret[0].identical(&expect(&[1, 2], &[3.0, 4.0])));

    let ret = part_by_column_lr(&r_vec(), 3, Filter::HEAD).unwrap();
    assert!(ret[0].identical(&expect(&[1, 3], &[1.0, 2.0, 3.0])));
}

#[test]
fn test_vector_columns_right_to_left() {
    let [left, right] = part_by_column_rl(&r_vec(), 1, 0b11).unwrap().into_array().unwrap();
    assert!(left.identical(&expect(&[1, 3], &[1.0, 2.0, 3.0])));
    assert!(right.identical(&expect(&[1, 1], &[4.0])));

    let ret = part_by_column_rl(&r_vec(), 2, Filter::HEAD).unwrap();
    assert!(ret[0].identical(&expect(&[1, 2], &[1.0, 2.0])));

    let ret = part_by_column_rl(&r_vec(), 3, Filter::HEAD).unwrap();
    assert!(ret[0].identical(&expect(&[1, 1], &[1.0])));
}

#[test]
fn test_matrix_columns() {
    let a = array_2x3();
    let [left, right] = part_by_column_lr(&a, 1, 0b11).unwrap().into_array().unwrap();
    assert!(left.identical(&expect(&[2, 1], &[1.0, 4.0])));
    assert!(right.identical(&expect(&[2, 2], &[2.0, 3.0, 5.0, 6.0])));

    let ret = part_by_column_lr(&a, 2, Filter::TAIL).unwrap();
    assert!(ret[0].identical(&expect(&[2, 1], &[3.0, 6.0])));

    let [left, right] = part_by_column_rl(&a, 1, 0b11).unwrap().into_array().unwrap();
    assert!(left.identical(&expect(&[2, 2], &[1.0, 2.0, 4.0, 5.0])));
    assert!(right.identical(&expect(&[2, 1], &[3.0, 6.0])));

    let ret = part_by_column_rl(&a, 2, Filter::TAIL).unwrap();
    assert!(ret[0].identical(&expect(&[2, 2], &[2.0, 3.0, 5.0, 6.0])));
}

#[test]
fn test_one_shot_errors() {
    assert!(matches!(
        part_by_row_tb(&c_vec(), 5, 0b11),
        Err(LaffError::PartitionOutOfRange {
            requested: 5,
            remaining: 4
        })
    ));
    assert!(matches!(
        part_by_column_lr(&c_vec(), 1, 0b100),
        Err(LaffError::InvalidFilter { .. })
    ));
}

#[test]
fn test_synchronized_vectors() {
    let x = DirectionalPartition::new(r_vec(), Direction::LeftToRight)
        .unwrap()
        .with_filter(Filter::TAIL)
        .unwrap();
    let y = DirectionalPartition::new(c_vec(), Direction::TopToBottom)
        .unwrap()
        .with_filter(Filter::TAIL)
        .unwrap();

    let mut seen = Vec::new();
    let calls = SyncPartition::new(x, y)
        .with_limit(r_vec().ncols())
        .run(|regions| {
            let [x_right, y_bottom] = regions.into_array()?;
            assert_eq!(x_right.to_vec(), y_bottom.to_vec());
            seen.push(x_right.len());
            Ok(())
        })
        .unwrap();
    assert_eq!(calls, 4);
    assert_eq!(seen, vec![3, 2, 1, 0]);
}

#[test]
fn test_six_way_walk_visits_every_diagonal() {
    let a = View::from_fn(&[4, 4], |idx| if idx[0] == idx[1] { 1.0 } else { 0.0 });
    let mut part = SixWayPartition::new(a)
        .unwrap()
        .with_filter(Filter::CORNER)
        .unwrap();
    let mut corners = 0;
    while let Advance::Step(regions) = part.advance(1).unwrap() {
        assert_eq!(regions[0].get(&[0, 0]).unwrap(), 1.0);
        corners += 1;
    }
    assert_eq!(corners, 4);
    assert_eq!(part.remaining(), 0);
}

#[test]
fn test_six_way_regions_are_disjoint_writers() {
    let a = View::<f64>::zeros(&[3, 4]);
    let mut part = SixWayPartition::new(a.clone()).unwrap();
    let six = part.advance_named(1).unwrap().into_result().unwrap();
    six.corner.fill(1.0);
    six.column_strip.fill(2.0);
    six.row_strip.fill(3.0);
    six.trailing.fill(4.0);
    assert_eq!(
        a.to_vec(),
        vec![1.0, 3.0, 3.0, 3.0, 2.0, 4.0, 4.0, 4.0, 2.0, 4.0, 4.0, 4.0]
    );
}
