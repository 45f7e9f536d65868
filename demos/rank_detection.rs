use orthokit::{
    ClassicalGramSchmidt, GramSchmidtOptions, ListVectorArray, Orthogonalizer, VectorArray,
    gram_schmidt,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), orthokit::OrthoError> {
    // RUST_LOG=orthokit=debug shows dropped vectors and reiterations
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let a = ListVectorArray::from_rows(vec![
        vec![1.0, 2.0, 3.0],
        vec![4.0, 5.0, 6.0],
        vec![7.0, 8.0, 9.0],
    ])?;

    let opts = GramSchmidtOptions::default().with_return_r(true);
    let (q, stats) = gram_schmidt(&a, &(), &opts)?;
    println!("modified: rank = {}, removed = {:?}, reiterations = {}", stats.rank, stats.removed, stats.reiterations);
    for k in 0..q.len() {
        println!("  q{k} = {:?}", q.vector(k));
    }
    if let Some(r) = &stats.r {
        println!("  R = {:?}", r);
    }

    let mut c = a.clone();
    let cgs = ClassicalGramSchmidt::<f64>::new(GramSchmidtOptions::default());
    let stats = cgs.orthogonalize(&mut c, &())?;
    println!("classical: rank = {}, removed = {:?}", stats.rank, stats.removed);
    for k in 0..c.len() {
        println!("  q{k} = {:?}", c.vector(k));
    }
    Ok(())
}
