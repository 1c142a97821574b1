pub type Fallible<T, E> = Result<T, E>;
