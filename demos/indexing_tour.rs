use matrix_index::{FormatConfig, Matrix};

fn main() {
    env_logger::init();

    // 10x10 grid holding 0..100 row by row
    let m = Matrix::new((10, 10), (0..100).collect::<Vec<i32>>())
        .expect("failed to create matrix");

    println!("Matrix shape: {:?}", m.shape());
    println!("{}", m);

    for expr in ["1, 1", "-1", "1:7:2", ":, 1", "1:4, :4", "[1, 4], [1, 4]", "::-3, ::-3"] {
        match m.query(expr) {
            Ok(selection) => println!("m[{}] =\n{}", expr, selection),
            Err(e) => println!("m[{}] failed: {}", expr, e),
        }
    }

    // Errors surface to the caller unchanged
    if let Err(e) = m.query("10") {
        println!("m[10] failed: {}", e);
    }

    let compact = FormatConfig::new(1, " ", Default::default());
    let corner = m
        .get((..3, ..3))
        .expect("valid selection")
        .into_matrix()
        .expect("3x3 selection is a matrix");
    println!("Compact rendering:\n{}", corner.render(&compact));
}
