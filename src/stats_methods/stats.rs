//all the methods of calculating averages and variances etc.

#[derive(Clone, Debug, PartialEq)]
pub struct MyVariance
{
    pub mean: f64,
    pub var: f64
}

impl MyVariance{

    pub fn mean(&self) -> f64
    {
        self.mean
    }

    pub fn variance(&self) -> f64
    {
        self.var
    }

    /// `frac` divides every value, e.g. by the system size
    pub fn from_slice(slice: &[u32], frac: Option<f64>) -> Self
    {
        let mean = calc_average(slice, frac);
        let var = calc_variance(slice, mean, frac);
        Self{
            mean,
            var
        }
    }
}

/// 0 for an empty slice
pub fn calc_average(slice: &[u32], frac: Option<f64>) -> f64
{
    if slice.is_empty(){
        return 0.0;
    }
    let sum: u64 = slice.iter().map(|&val| val as u64).sum();

    let len = slice.len() as u64;
    let rest = sum % len;
    let div = sum / len;

    let res = div as f64 + (rest as f64) / (len as f64);
    match frac{
        None => res,
        Some(f) => res / f
    }
}

pub fn calc_variance(slice: &[u32], average: f64, frac: Option<f64>) -> f64
{
    if slice.is_empty(){
        return 0.0;
    }
    let scale = frac.unwrap_or(1.0);
    let var_sum: f64 = slice.iter()
        .map(
            |&val|
            {
                let dif = average - val as f64 / scale;
                dif * dif
            }
        ).sum();

    var_sum / slice.len() as f64
}

/// Average over curves of different length, missing entries count as 0
pub fn mean_curve<C>(curves: &[C]) -> Vec<f64>
where C: AsRef<[usize]>
{
    let len = curves.iter()
        .map(|c| c.as_ref().len())
        .max()
        .unwrap_or(0);
    let mut sum = vec![0_u64; len];
    for curve in curves{
        for (s, &val) in sum.iter_mut().zip(curve.as_ref()){
            *s += val as u64;
        }
    }
    let n = curves.len() as f64;
    sum.into_iter()
        .map(|s| s as f64 / n)
        .collect()
}
